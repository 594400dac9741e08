//! Account records
//!
//! Types returned by credential store operations.

use chrono::{Local, NaiveDateTime, SubsecRound};
use std::fmt;
use std::str::FromStr;

/// Format of every timestamp written to the table.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Persisted value of `last_login` for accounts that never logged in.
pub const NEVER: &str = "Never";

/// Wall-clock time as stored in the table.
pub type Timestamp = NaiveDateTime;

/// Current local time truncated to whole seconds, so it survives a table round-trip.
pub fn now() -> Timestamp {
    Local::now().naive_local().trunc_subsecs(0)
}

pub(crate) fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(value: &str) -> Result<Timestamp, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}

/// Time of the last successful login
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LastLogin {
    Never,
    At(Timestamp),
}

impl LastLogin {
    /// Move to `at`, unless that would be earlier than the current value.
    pub fn advance(&mut self, at: Timestamp) {
        let next = LastLogin::At(at);
        if next > *self {
            *self = next;
        }
    }
}

impl fmt::Display for LastLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastLogin::Never => f.write_str(NEVER),
            LastLogin::At(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl FromStr for LastLogin {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NEVER {
            Ok(LastLogin::Never)
        } else {
            parse_timestamp(s).map(LastLogin::At)
        }
    }
}

/// One registered identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub last_login: LastLogin,
}

impl Account {
    pub(crate) fn new(username: &str, password_hash: String, created_at: Timestamp) -> Self {
        Self {
            username: username.to_string(),
            password_hash,
            created_at,
            last_login: LastLogin::Never,
        }
    }

    /// Usernames compare case-insensitively.
    pub fn matches(&self, username: &str) -> bool {
        username_key(&self.username) == username_key(username)
    }
}

/// Key under which usernames are compared for uniqueness.
pub(crate) fn username_key(username: &str) -> String {
    username.to_lowercase()
}

/// Display row of an account, without the password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub username: String,
    pub created_at: Timestamp,
    pub last_login: LastLogin,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            created_at: account.created_at,
            last_login: account.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn last_login_only_moves_forward() {
        let mut last = LastLogin::Never;
        last.advance(at(10, 0, 0));
        assert_eq!(last, LastLogin::At(at(10, 0, 0)));

        last.advance(at(9, 0, 0));
        assert_eq!(last, LastLogin::At(at(10, 0, 0)));

        last.advance(at(11, 30, 0));
        assert_eq!(last, LastLogin::At(at(11, 30, 0)));
    }

    #[test]
    fn last_login_text_form() {
        assert_eq!(LastLogin::Never.to_string(), "Never");
        assert_eq!("Never".parse::<LastLogin>().unwrap(), LastLogin::Never);

        let parsed: LastLogin = "2024-03-01 10:05:09".parse().unwrap();
        assert_eq!(parsed, LastLogin::At(at(10, 5, 9)));
        assert_eq!(parsed.to_string(), "2024-03-01 10:05:09");

        assert!("yesterday".parse::<LastLogin>().is_err());
    }

    #[test]
    fn matching_ignores_case() {
        let account = Account::new("Alice", "0".repeat(64), at(8, 0, 0));
        assert!(account.matches("alice"));
        assert!(account.matches("ALICE"));
        assert!(!account.matches("alice2"));
    }

    #[test]
    fn now_has_no_subsecond_part() {
        use chrono::Timelike;
        assert_eq!(now().nanosecond(), 0);
    }

    #[test]
    fn summary_drops_the_hash() {
        let account = Account::new("alice", "ab".repeat(32), at(8, 0, 0));
        let summary = AccountSummary::from(&account);
        assert_eq!(summary.username, "alice");
        assert_eq!(summary.created_at, account.created_at);
        assert_eq!(summary.last_login, LastLogin::Never);
    }
}
