//! Domain primitives, ports, and services.
//!
//! Purpose: strongly typed entities and use-cases shared by the inbound HTTP
//! adapter and the persistence layer. Types are immutable; invariants and
//! serde contracts live in each type's Rustdoc. Services depend only on the
//! ports in [`ports`], never on concrete adapters.

pub mod accounts;
pub mod auth;
pub mod credentials;
pub mod error;
pub mod friendship;
pub mod network;
pub mod ports;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::accounts::AccountService;
pub use self::auth::{AuthValidationError, LoginCredentials, NewRegistration};
pub use self::credentials::PasswordHash;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::friendship::FriendshipService;
pub use self::network::{Degree, DegreeValidationError, FriendNetworkEntry, FriendNetworkService};
pub use self::user::{DisplayName, EmailAddress, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
