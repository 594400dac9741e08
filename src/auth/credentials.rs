//! Password digests
//!
//! Passwords are stored as the unsalted SHA-256 digest of their UTF-8 bytes,
//! hex encoded in lowercase.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Hash a password with SHA-256.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check `password` against a stored digest without short-circuiting on the
/// first differing byte.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    constant_time_eq(hash_password(password).as_bytes(), stored_hash.as_bytes())
}

/// Returns true if `value` has the shape of a stored digest.
pub fn is_password_hash(value: &str) -> bool {
    value.len() == HASH_HEX_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_password("Str0ng!Pw"), hash_password("Str0ng!Pw"));
    }

    #[test]
    fn distinct_passwords_hash_differently() {
        let samples = ["Password123!", "password123!", "MySecure@Pass2024", "", "Str0ng!Pw"];
        for (i, a) in samples.iter().enumerate() {
            for b in &samples[i + 1..] {
                assert_ne!(hash_password(a), hash_password(b));
            }
        }
    }

    #[test]
    fn hash_matches_known_sha256() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let digest = hash_password("Password123!");
        assert!(is_password_hash(&digest));
        assert!(!digest.contains("Password123!"));
    }

    #[test]
    fn verify_accepts_only_the_original_password() {
        let stored = hash_password("DemoPass123!");
        assert!(verify_password("DemoPass123!", &stored));
        assert!(!verify_password("wrongpassword", &stored));
        assert!(!verify_password("DemoPass123!", &stored[..10]));
    }

    #[test]
    fn hash_shape_check() {
        assert!(!is_password_hash("Password123!"));
        assert!(!is_password_hash(&"g".repeat(HASH_HEX_LEN)));
    }
}
