//! Account use-cases: registration, login, profile.
//!
//! Plaintext passwords stop here: registration hashes before anything
//! touches a port, and login verifies against stored material. Login
//! failures collapse to one indistinguishable `unauthorized` error so the
//! response does not reveal whether an email is registered.

use std::sync::Arc;

use async_trait::async_trait;

use super::auth::{LoginCredentials, NewRegistration};
use super::credentials::{hash_password, verify_password};
use super::error::Error;
use super::ports::{Accounts, GraphPersistenceError, NewUserRecord, SocialGraphRepository};
use super::user::{User, UserId};

/// Account service implementing the [`Accounts`] driving port.
#[derive(Clone)]
pub struct AccountService<R> {
    repo: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service over the given store.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_store_error(error: GraphPersistenceError) -> Error {
    match error {
        GraphPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("social graph unavailable: {message}"))
        }
        other => Error::internal(format!("account store failure: {other}")),
    }
}

fn invalid_credentials() -> Error {
    // One message for unknown email and wrong password alike.
    Error::unauthorized("invalid credentials")
}

#[async_trait]
impl<R> Accounts for AccountService<R>
where
    R: SocialGraphRepository,
{
    async fn register(&self, registration: &NewRegistration) -> Result<User, Error> {
        let record = NewUserRecord {
            name: registration.name().clone(),
            email: registration.email().clone(),
            password_hash: hash_password(registration.password()),
        };

        self.repo.create_user(&record).await.map_err(|error| match error {
            GraphPersistenceError::DuplicateEmail => {
                Error::conflict("a user with this email already exists")
            }
            other => map_store_error(other),
        })
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let record = self
            .repo
            .find_user_by_email(credentials.email())
            .await
            .map_err(map_store_error)?
            .ok_or_else(invalid_credentials)?;

        let matches = verify_password(credentials.password(), &record.password_hash)
            .map_err(|err| Error::internal(format!("stored credential unreadable: {err}")))?;
        if !matches {
            return Err(invalid_credentials());
        }
        Ok(record.user.id())
    }

    async fn fetch_profile(&self, id: UserId) -> Result<User, Error> {
        self.repo
            .find_user_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("user no longer exists"))
    }
}
