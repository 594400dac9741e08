//! Authentication rules
//!
//! Username and password policy checks, and the one-way password digest.

pub mod credentials;
pub mod validator;

pub use credentials::{hash_password, is_password_hash, verify_password};
pub use validator::{Policy, SPECIAL_CHARACTERS, validate_password, validate_username};
