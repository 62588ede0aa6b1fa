//! Friendship edge mutation.
//!
//! The sole graph-mutating operation besides user creation. A friendship is
//! a single directed edge; adding A -> B never creates B -> A. The store's
//! uniqueness constraint is the enforcement point for duplicates, so two
//! racing identical requests resolve with exactly one conflict.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::ports::{FriendshipCommand, GraphPersistenceError, SocialGraphRepository};
use super::user::{EmailAddress, UserId};

/// Edge mutator service implementing [`FriendshipCommand`].
#[derive(Clone)]
pub struct FriendshipService<R> {
    repo: Arc<R>,
}

impl<R> FriendshipService<R> {
    /// Create a new service over the given store.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_lookup_error(error: GraphPersistenceError) -> Error {
    match error {
        GraphPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("social graph unavailable: {message}"))
        }
        other => Error::internal(format!("friend lookup failed: {other}")),
    }
}

fn map_insert_error(error: GraphPersistenceError) -> Error {
    match error {
        GraphPersistenceError::DuplicateEdge => Error::conflict("friendship already exists"),
        // The caller's own row can vanish between session validation and the
        // insert; surface that the same way as an unknown friend.
        GraphPersistenceError::MissingEndpoint => Error::not_found("user does not exist"),
        GraphPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("social graph unavailable: {message}"))
        }
        other => Error::internal(format!("friendship insert failed: {other}")),
    }
}

#[async_trait]
impl<R> FriendshipCommand for FriendshipService<R>
where
    R: SocialGraphRepository,
{
    async fn add_friend(&self, user: UserId, friend_email: &EmailAddress) -> Result<(), Error> {
        let friend = self
            .repo
            .find_user_by_email(friend_email)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| Error::not_found("no user with this email"))?;

        self.repo
            .insert_friendship(user, friend.user.id())
            .await
            .map_err(map_insert_error)
    }
}
