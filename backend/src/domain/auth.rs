//! Validated authentication request values.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential shape checks here. Password *content* rules are deliberately
//! minimal (non-empty); strength policy belongs to the frontend.

use thiserror::Error;

use super::user::{DisplayName, EmailAddress, UserValidationError};

/// Validation errors for [`LoginCredentials`] and [`NewRegistration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthValidationError {
    /// Name or email failed its value-type constraints.
    #[error(transparent)]
    Invalid(#[from] UserValidationError),
    /// Password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Credentials supplied to `POST /v1/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: String,
}

impl LoginCredentials {
    /// Validate and construct credentials from raw request parts.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: password.to_owned(),
        })
    }

    /// Email the caller claims to own.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password attempt; compared against stored credential material only.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated payload for `POST /v1/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    name: DisplayName,
    email: EmailAddress,
    password: String,
}

impl NewRegistration {
    /// Validate and construct a registration from raw request parts.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            name: DisplayName::new(name)?,
            email: EmailAddress::new(email)?,
            password: password.to_owned(),
        })
    }

    /// Display name for the new account.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email for the new account.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password; hashed before it reaches any port.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn login_rejects_empty_password() {
        let err = LoginCredentials::try_from_parts("ada@example.com", "")
            .expect_err("empty password rejected");
        assert_eq!(err, AuthValidationError::EmptyPassword);
    }

    #[rstest]
    fn login_rejects_malformed_email() {
        let err =
            LoginCredentials::try_from_parts("not-an-email", "pw").expect_err("email rejected");
        assert_eq!(
            err,
            AuthValidationError::Invalid(UserValidationError::InvalidEmail)
        );
    }

    #[rstest]
    fn registration_accepts_valid_parts() {
        let registration = NewRegistration::try_from_parts("Ada", "ada@example.com", "hunter2")
            .expect("valid registration");
        assert_eq!(registration.name().as_ref(), "Ada");
        assert_eq!(registration.email().as_str(), "ada@example.com");
        assert_eq!(registration.password(), "hunter2");
    }

    #[rstest]
    fn registration_rejects_blank_name() {
        let err = NewRegistration::try_from_parts(" ", "ada@example.com", "hunter2")
            .expect_err("blank name rejected");
        assert_eq!(
            err,
            AuthValidationError::Invalid(UserValidationError::EmptyDisplayName)
        );
    }
}
