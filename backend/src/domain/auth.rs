//! Admin login credentials and password hashes.
//!
//! Inbound adapters hand raw strings to these constructors so the domain
//! only ever sees validated values.

use std::fmt;

use argon2::password_hash::{self, PasswordHash, PasswordVerifier};
use argon2::Argon2;
use zeroize::Zeroizing;

/// Errors raised while validating login input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was blank once trimmed.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and non-empty.
/// - `password` is non-empty and kept verbatim; it is zeroed on drop.
///
/// # Examples
/// ```
/// use techfix::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Owner@TechFix.nl ", "hunter2").unwrap();
/// assert_eq!(creds.email(), "owner@techfix.nl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form input.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = normalise_email(email);
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for account lookups.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as supplied.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Lowercase and trim an email address for storage and comparison.
#[must_use]
pub fn normalise_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Error returned when a stored hash is not a valid PHC string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid password hash: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Argon2id password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPasswordHash(String);

impl AdminPasswordHash {
    /// Validate that `phc` parses as a PHC string.
    pub fn parse(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|err| PasswordHashError {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Check `password` against the stored hash.
    pub fn verify(&self, password: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(&self.0).map_err(|err| PasswordHashError {
            message: err.to_string(),
        })?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError {
                message: err.to_string(),
            }),
        }
    }

    /// Stored PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AdminPasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminPasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::hash_password;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("owner@techfix.nl", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_input(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("blank input must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn keeps_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("a@b.nl", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[test]
    fn verifies_matching_password() {
        let hash = hash_password("hunter2");
        assert!(hash.verify("hunter2").expect("verify"));
        assert!(!hash.verify("hunter3").expect("verify"));
    }

    #[test]
    fn rejects_non_phc_strings() {
        assert!(AdminPasswordHash::parse("plaintext").is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let hash = hash_password("hunter2");
        assert_eq!(format!("{hash:?}"), "AdminPasswordHash(<redacted>)");
    }
}
