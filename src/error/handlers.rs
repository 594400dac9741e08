//! Error handlers
//!
//! Maps store errors to log records and to the messages shown by the menu.

use crate::error::types::{ErrorKind, StoreError};
use log::{error, warn};

/// Log a store error at a level matching its severity
pub fn handle_error(err: &StoreError) {
    if err.is_recoverable() {
        warn!("Rejected request: {}", err);
    } else {
        error!("Credential store failure: {}", err);
    }
}

/// Convert an error into the one-line message shown to the person at the terminal
pub fn user_message(err: &StoreError) -> String {
    match err.kind() {
        ErrorKind::InvalidUsername => "Invalid username!".to_string(),
        ErrorKind::WeakPassword => "Weak password!".to_string(),
        ErrorKind::DuplicateUsername => "Username already exists! Try another.".to_string(),
        ErrorKind::EmptyCredential => "Username and password cannot be empty!".to_string(),
        ErrorKind::UserNotFound => "Username not found!".to_string(),
        ErrorKind::InvalidPassword => "Invalid password!".to_string(),
        ErrorKind::StorageUnavailable | ErrorKind::CorruptTable => {
            format!("User table error: {}", err)
        }
    }
}
