//! Account table codec
//!
//! The table is comma-separated text with a header row. Fields containing the
//! delimiter or quotes are quoted. Tables written without the `last_login`
//! column load with every account marked as never logged in.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::auth::is_password_hash;
use crate::error::StorageError;
use crate::storage::filesystem::replace_file;
use crate::store::results::{
    Account, LastLogin, format_timestamp, parse_timestamp, username_key,
};

/// Column names, in order. The last column is optional when reading.
pub const HEADER: [&str; 4] = ["username", "password_hash", "created_date", "last_login"];

const LEGACY_COLUMNS: usize = 3;

#[derive(Debug, Deserialize)]
struct Row {
    username: String,
    password_hash: String,
    created_date: String,
    #[serde(default)]
    last_login: Option<String>,
}

#[derive(Debug, Serialize)]
struct RowRef<'a> {
    username: &'a str,
    password_hash: &'a str,
    created_date: String,
    last_login: String,
}

impl<'a> From<&'a Account> for RowRef<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            username: &account.username,
            password_hash: &account.password_hash,
            created_date: format_timestamp(&account.created_at),
            last_login: account.last_login.to_string(),
        }
    }
}

impl Row {
    /// `legacy` is true when the table has no `last_login` column.
    fn into_account(self, path: &Path, line: u64, legacy: bool) -> Result<Account, StorageError> {
        let corrupt = |reason: String| StorageError::corrupt(path, line, reason);

        if self.username.is_empty() {
            return Err(corrupt("empty username".into()));
        }
        if !is_password_hash(&self.password_hash) {
            return Err(corrupt(format!(
                "malformed password hash for {}",
                self.username
            )));
        }

        let created_at = parse_timestamp(&self.created_date)
            .map_err(|e| corrupt(format!("bad created_date {:?}: {}", self.created_date, e)))?;

        let last_login = match self.last_login.as_deref() {
            None if legacy => LastLogin::Never,
            None => return Err(corrupt("empty last_login".into())),
            Some(value) => value
                .parse()
                .map_err(|e| corrupt(format!("bad last_login {:?}: {}", value, e)))?,
        };

        Ok(Account {
            username: self.username,
            password_hash: self.password_hash.to_ascii_lowercase(),
            created_at,
            last_login,
        })
    }
}

fn csv_error(path: &Path, err: csv::Error) -> StorageError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => StorageError::unavailable(path, source),
        _ => StorageError::corrupt(path, line, reason),
    }
}

/// Parse a whole table. `path` is only used in error reports.
pub fn decode_table<R: Read>(path: &Path, data: R) -> Result<Vec<Account>, StorageError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data);

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let columns: Vec<&str> = headers.iter().collect();
    if columns[..] != HEADER[..] && columns[..] != HEADER[..LEGACY_COLUMNS] {
        return Err(StorageError::corrupt(
            path,
            1,
            format!("unexpected header: {}", columns.join(",")),
        ));
    }

    let legacy = columns.len() == LEGACY_COLUMNS;
    let mut accounts = Vec::new();
    let mut seen = HashSet::new();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(path, e))?
    {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: Row = record
            .deserialize(Some(&headers))
            .map_err(|e| csv_error(path, e))?;
        let account = row.into_account(path, line, legacy)?;

        if !seen.insert(username_key(&account.username)) {
            return Err(StorageError::corrupt(
                path,
                line,
                format!("duplicate username {}", account.username),
            ));
        }
        accounts.push(account);
    }

    Ok(accounts)
}

/// Serialize `accounts` with the full four-column header.
pub fn encode_table(accounts: &[Account]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for account in accounts {
        writer.serialize(RowRef::from(account))?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Load the table at `path`. A missing file is an empty table.
pub fn read_table(path: &Path) -> Result<Vec<Account>, StorageError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::unavailable(path, e)),
    };

    decode_table(path, BufReader::new(file))
}

/// Replace the table at `path` with `accounts`.
pub fn write_table(path: &Path, accounts: &[Account]) -> Result<(), StorageError> {
    let bytes = encode_table(accounts).map_err(|e| StorageError::unavailable(path, e.into()))?;
    replace_file(path, &bytes)
}
