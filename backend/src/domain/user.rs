//! User identity model.
//!
//! Purpose: strongly typed user identity shared by the API and persistence
//! layers. Validation limits follow the registration contract: display names
//! are 1–50 characters, emails 1–100 characters with basic address syntax.
//! Emails are stored and compared case-sensitively.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Display name is empty once trimmed of whitespace.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name exceeds the maximum length.
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },
    /// Email is empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email exceeds the maximum length.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },
    /// Email does not look like an address.
    #[error("email must be a valid address")]
    InvalidEmail,
}

/// Stable numeric user identifier assigned by the database on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a database-assigned identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 50;

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }

    /// Access the validated display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Globally unique email address.
///
/// ## Invariants
/// - 1–100 characters with `local@domain.tld` shape.
/// - Case is preserved: `Ada@example.com` and `ada@example.com` are distinct
///   addresses as far as this backend is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 100;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains the shape.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `name` and `email` satisfy their value-type constraints.
/// - `id` is assigned once by the store and never changes.
///
/// Credential material is deliberately absent; it never leaves the
/// persistence boundary (see `UserRecord` on the repository port).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = i64, example = 42)]
    id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    name: DisplayName,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
}

impl User {
    /// Build a new [`User`] from validated components.
    #[must_use]
    pub const fn new(id: UserId, name: DisplayName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Fallible constructor enforcing display name and email invariants.
    pub fn try_from_parts(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id),
            DisplayName::new(name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name shown to other users.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Unique email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: i64,
    name: String,
    email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name, email } = value;
        Self {
            id: id.as_i64(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.name, value.email)
    }
}
