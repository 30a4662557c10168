use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use super::AuthError;

/// A single registration password rule
pub struct PasswordCheck {
    pub label: &'static str,
    test: fn(&str) -> bool,
}

impl PasswordCheck {
    pub fn passes(&self, password: &str) -> bool {
        (self.test)(password)
    }
}

pub static PASSWORD_CHECKS: [PasswordCheck; 4] = [
    PasswordCheck {
        label: "At least 6 characters",
        test: |pw| pw.chars().count() >= 6,
    },
    PasswordCheck {
        label: "At least one uppercase letter",
        test: |pw| pw.chars().any(|c| c.is_ascii_uppercase()),
    },
    PasswordCheck {
        label: "At least one number",
        test: |pw| pw.chars().any(|c| c.is_ascii_digit()),
    },
    PasswordCheck {
        label: "At least one special character (!@#$%^&*)",
        test: |pw| pw.chars().any(|c| "!@#$%^&*".contains(c)),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Moderate,
    Strong,
}

pub fn strength(password: &str) -> PasswordStrength {
    match PASSWORD_CHECKS.iter().filter(|c| c.passes(password)).count() {
        0 | 1 => PasswordStrength::Weak,
        2 | 3 => PasswordStrength::Moderate,
        _ => PasswordStrength::Strong,
    }
}

/// Labels of the rules `password` does not satisfy
pub fn unmet_requirements(password: &str) -> Vec<&'static str> {
    PASSWORD_CHECKS
        .iter()
        .filter(|c| !c.passes(password))
        .map(|c| c.label)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// False for a wrong password and for a malformed stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}
