//! Authentication primitives: login credentials and password hashing.
//!
//! Inbound payload parsing stays outside the domain; handlers build
//! [`LoginCredentials`] through the validating constructor before they talk to
//! a [`LoginService`](crate::domain::ports::LoginService).

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, SaltString};
use zeroize::Zeroizing;

use super::{EmailAddress, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    #[error("email is invalid: {0}")]
    InvalidEmail(UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is a normalised [`EmailAddress`].
/// - `password` is non-empty but keeps caller-provided whitespace so stored
///   hashes compare against exactly what the user typed.
///
/// # Examples
/// ```
/// use exam_registry::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Admin@Example.org", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "admin@example.org");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look up the account.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Failure raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Hash `password` into a PHC string using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })
}

/// Check `password` against a stored PHC hash.
///
/// Malformed hashes never verify.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(error) => {
            tracing::warn!(%error, "stored password hash is malformed");
            false
        }
    }
}
