//! passcheck - a local username/password store
//!
//! Registers usernames with hashed passwords, authenticates login attempts and
//! lists registered accounts, persisting everything in one comma-separated table.

pub mod auth;
pub mod config;
pub mod error;
pub mod menu;
pub mod storage;
pub mod store;
pub mod utils;

pub use auth::Policy;
pub use config::StoreConfig;
pub use error::{AuthError, ErrorKind, StorageError, StoreError};
pub use store::{Account, AccountSummary, CredentialStore, LastLogin};
