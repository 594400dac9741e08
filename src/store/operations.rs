//! Store operations
//!
//! Every operation loads the whole table, works on it in memory and, when it
//! changes something, writes the whole table back. Nothing is cached between
//! calls. Mutating cycles hold the table lock from load to store.

use std::path::{Path, PathBuf};

use crate::auth::{Policy, hash_password, verify_password};
use crate::error::{AuthError, StorageError, StoreError};
use crate::storage::{self, TableLock};
use crate::store::results::{self, Account, AccountSummary, Timestamp};

/// File-backed account table with its validation policy
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    policy: Policy,
    clock: fn() -> Timestamp,
}

impl CredentialStore {
    /// Create a handle without touching the file system.
    pub fn new(path: impl Into<PathBuf>, policy: Policy) -> Self {
        Self {
            path: path.into(),
            policy,
            clock: results::now,
        }
    }

    /// Create a handle and make sure the table exists.
    pub fn open(path: impl Into<PathBuf>, policy: Policy) -> Result<Self, StoreError> {
        let store = Self::new(path, policy);
        store.initialize()?;
        Ok(store)
    }

    /// Replace the time source used for `created_at` and `last_login`.
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Create the table with a header row if it does not exist yet. Idempotent.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let header = storage::table::encode_table(&[])
            .map_err(|e| StorageError::unavailable(&self.path, e.into()))?;
        storage::ensure_table(&self.path, &header)?;
        Ok(())
    }

    pub fn validate_username(&self, username: &str) -> bool {
        self.policy.validate_username(username)
    }

    pub fn validate_password(&self, password: &str) -> bool {
        self.policy.validate_password(password)
    }

    pub fn hash_password(&self, password: &str) -> String {
        hash_password(password)
    }

    /// Returns true if an account matches `username`, ignoring case.
    pub fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.load()?.iter().any(|a| a.matches(username)))
    }

    /// Look up the stored account for `username`.
    pub fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.load()?.into_iter().find(|a| a.matches(username)))
    }

    /// Register a new account.
    ///
    /// Checks run in order: username format, uniqueness, password strength.
    /// Nothing is written unless all three pass.
    pub fn register(&self, username: &str, password: &str) -> Result<Account, StoreError> {
        if !self.policy.validate_username(username) {
            return Err(AuthError::InvalidUsername(username.to_string()).into());
        }

        let _lock = TableLock::acquire(&self.path)?;
        let mut accounts = self.load()?;

        if accounts.iter().any(|a| a.matches(username)) {
            return Err(AuthError::DuplicateUsername(username.to_string()).into());
        }
        if !self.policy.validate_password(password) {
            return Err(AuthError::WeakPassword.into());
        }

        let account = Account::new(username, hash_password(password), (self.clock)());
        accounts.push(account.clone());
        storage::write_table(&self.path, &accounts)?;

        Ok(account)
    }

    /// Check credentials and record the login time.
    ///
    /// An unknown username is reported before the password is checked, so the
    /// two failures stay distinguishable.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Account, StoreError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyCredential.into());
        }

        let _lock = TableLock::acquire(&self.path)?;
        let mut accounts = self.load()?;

        let account = accounts
            .iter_mut()
            .find(|a| a.matches(username))
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::InvalidPassword(username.to_string()).into());
        }

        account.last_login.advance((self.clock)());
        let authenticated = account.clone();
        storage::write_table(&self.path, &accounts)?;

        Ok(authenticated)
    }

    /// All accounts in registration order, without password hashes.
    pub fn list(&self) -> Result<Vec<AccountSummary>, StoreError> {
        Ok(self.load()?.iter().map(AccountSummary::from).collect())
    }

    fn load(&self) -> Result<Vec<Account>, StoreError> {
        Ok(storage::read_table(&self.path)?)
    }
}
