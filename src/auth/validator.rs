//! Input validation policies
//!
//! Two policies exist. `Strict` is the default: 3-20 alphanumeric characters for
//! usernames and composed passwords of at least 8 characters. `Lenient` is the
//! legacy/demo mode: usernames of 3+ alphanumeric or underscore characters and
//! passwords of at least 6 characters with no composition rule.
//!
//! Lengths count characters, not bytes. Letters follow Unicode case properties;
//! digits are ASCII `0-9` only.

use serde::Deserialize;

/// Characters that satisfy the "special character" requirement of the strict policy.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

const STRICT_USERNAME_MIN: usize = 3;
const STRICT_USERNAME_MAX: usize = 20;
const STRICT_PASSWORD_MIN: usize = 8;

const LENIENT_USERNAME_MIN: usize = 3;
const LENIENT_PASSWORD_MIN: usize = 6;

/// Validation policy applied by the credential store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Strict,
    Lenient,
}

impl Policy {
    /// Returns true if `username` may be registered under this policy.
    pub fn validate_username(&self, username: &str) -> bool {
        let len = username.chars().count();
        match self {
            Policy::Strict => {
                (STRICT_USERNAME_MIN..=STRICT_USERNAME_MAX).contains(&len)
                    && username.chars().all(char::is_alphanumeric)
            }
            Policy::Lenient => {
                len >= LENIENT_USERNAME_MIN
                    && username.chars().all(|c| c.is_alphanumeric() || c == '_')
            }
        }
    }

    /// Returns true if `password` is strong enough under this policy.
    pub fn validate_password(&self, password: &str) -> bool {
        match self {
            Policy::Strict => {
                if password.chars().count() < STRICT_PASSWORD_MIN {
                    return false;
                }

                let has_upper = password.chars().any(char::is_uppercase);
                let has_lower = password.chars().any(char::is_lowercase);
                let has_digit = password.chars().any(|c| c.is_ascii_digit());
                let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

                has_upper && has_lower && has_digit && has_special
            }
            Policy::Lenient => password.chars().count() >= LENIENT_PASSWORD_MIN,
        }
    }

    /// Short description of the username rule, for prompts.
    pub fn username_hint(&self) -> &'static str {
        match self {
            Policy::Strict => "3-20 alphanumeric characters",
            Policy::Lenient => "3+ letters, digits or underscores",
        }
    }

    /// Short description of the password rule, for prompts.
    pub fn password_hint(&self) -> &'static str {
        match self {
            Policy::Strict => "8+ chars, mixed case, digit, special",
            Policy::Lenient => "6+ characters",
        }
    }
}

/// Validates a username under the strict policy.
pub fn validate_username(username: &str) -> bool {
    Policy::Strict.validate_username(username)
}

/// Validates a password under the strict policy.
pub fn validate_password(password: &str) -> bool {
    Policy::Strict.validate_password(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_username_rules() {
        let long = "a".repeat(25);
        let cases = [
            ("validuser", true),
            ("ab", false),
            (long.as_str(), false),
            ("user@123", false),
            ("user123", true),
            ("", false),
            ("User_Name", false),
            ("abc", true),
            ("abcdefghijklmnopqrst", true),
            ("abcdefghijklmnopqrstu", false),
            ("with space", false),
        ];

        for (username, expected) in cases {
            assert_eq!(validate_username(username), expected, "username {:?}", username);
        }
    }

    #[test]
    fn strict_username_counts_characters_not_bytes() {
        assert!(validate_username("élève"));
        assert!(!validate_username("éé"));
    }

    #[test]
    fn lenient_username_allows_underscore_without_upper_bound() {
        assert!(Policy::Lenient.validate_username("User_Name"));
        assert!(Policy::Lenient.validate_username(&"a".repeat(25)));
        assert!(!Policy::Lenient.validate_username("ab"));
        assert!(!Policy::Lenient.validate_username("user@123"));
    }

    #[test]
    fn strict_password_rules() {
        let cases = [
            ("Password123!", true),
            ("password", false),
            ("PASSWORD123!", false),
            ("Password!", false),
            ("Pass123", false),
            ("Pw1!", false),
            ("MySecure@Pass2024", true),
            ("Str0ng!Pw", true),
            ("Abcdefg1~", false),
            ("Password½!", false),
            ("PasswordⅫ!", false),
            ("Password²!", false),
        ];

        for (password, expected) in cases {
            assert_eq!(validate_password(password), expected, "password {:?}", password);
        }
    }

    #[test]
    fn short_passwords_fail_regardless_of_composition() {
        assert!(!validate_password("Aa1!Aa1"));
        assert!(validate_password("Aa1!Aa1!"));
    }

    #[test]
    fn every_special_character_counts() {
        for c in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abcdef1{}", c);
            assert!(validate_password(&password), "special {:?}", c);
        }
    }

    #[test]
    fn lenient_password_only_checks_length() {
        assert!(Policy::Lenient.validate_password("simple"));
        assert!(!Policy::Lenient.validate_password("short"));
    }
}
