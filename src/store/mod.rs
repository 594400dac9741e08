//! Credential store
//!
//! Register, authenticate and list accounts kept in a file-backed table.

pub mod operations;
pub mod results;

pub use operations::CredentialStore;
pub use results::{Account, AccountSummary, LastLogin, NEVER, TIMESTAMP_FORMAT, Timestamp, now};
