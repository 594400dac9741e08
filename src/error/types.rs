//! Error types
//!
//! Authentication and storage failures are kept in separate enums and folded into
//! [`StoreError`] at the store boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Validation and authentication failures. All of them are recoverable by
/// retrying with different input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidUsername(String),
    WeakPassword,
    DuplicateUsername(String),
    EmptyCredential,
    UserNotFound(String),
    InvalidPassword(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidUsername(u) => write!(f, "Invalid username: {}", u),
            AuthError::WeakPassword => write!(f, "Password does not meet the policy"),
            AuthError::DuplicateUsername(u) => write!(f, "Username already exists: {}", u),
            AuthError::EmptyCredential => write!(f, "Username and password are required"),
            AuthError::UserNotFound(u) => write!(f, "User not found: {}", u),
            AuthError::InvalidPassword(u) => write!(f, "Invalid password for user: {}", u),
        }
    }
}

impl std::error::Error for AuthError {}

/// Failures of the backing table file
#[derive(Debug)]
pub enum StorageError {
    /// The table could not be created, read or written.
    Unavailable { path: PathBuf, source: io::Error },
    /// The table was readable but a row or the header is malformed.
    CorruptTable {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

impl StorageError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Unavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        StorageError::CorruptTable {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable { path, source } => {
                write!(f, "Storage unavailable at {}: {}", path.display(), source)
            }
            StorageError::CorruptTable { path, line, reason } => {
                write!(
                    f,
                    "Corrupt table {} at line {}: {}",
                    path.display(),
                    line,
                    reason
                )
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Unavailable { source, .. } => Some(source),
            StorageError::CorruptTable { .. } => None,
        }
    }
}

/// Flat classification of every failure the store can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StorageUnavailable,
    CorruptTable,
    InvalidUsername,
    WeakPassword,
    DuplicateUsername,
    EmptyCredential,
    UserNotFound,
    InvalidPassword,
}

/// Error returned by every [`CredentialStore`](crate::store::CredentialStore) operation
#[derive(Debug)]
pub enum StoreError {
    Auth(AuthError),
    Storage(StorageError),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Auth(AuthError::InvalidUsername(_)) => ErrorKind::InvalidUsername,
            StoreError::Auth(AuthError::WeakPassword) => ErrorKind::WeakPassword,
            StoreError::Auth(AuthError::DuplicateUsername(_)) => ErrorKind::DuplicateUsername,
            StoreError::Auth(AuthError::EmptyCredential) => ErrorKind::EmptyCredential,
            StoreError::Auth(AuthError::UserNotFound(_)) => ErrorKind::UserNotFound,
            StoreError::Auth(AuthError::InvalidPassword(_)) => ErrorKind::InvalidPassword,
            StoreError::Storage(StorageError::Unavailable { .. }) => ErrorKind::StorageUnavailable,
            StoreError::Storage(StorageError::CorruptTable { .. }) => ErrorKind::CorruptTable,
        }
    }

    /// True for failures caused by the caller's input rather than the table file.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Auth(_))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Auth(e) => write!(f, "Authentication error: {}", e),
            StoreError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Auth(e) => Some(e),
            StoreError::Storage(e) => Some(e),
        }
    }
}

impl From<AuthError> for StoreError {
    fn from(error: AuthError) -> Self {
        StoreError::Auth(error)
    }
}

impl From<StorageError> for StoreError {
    fn from(error: StorageError) -> Self {
        StoreError::Storage(error)
    }
}
