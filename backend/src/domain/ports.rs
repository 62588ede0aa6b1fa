//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with adapters. The
//! driven side is the social graph store; the driving side is the set of
//! use-case traits consumed by HTTP handlers. Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants
//! instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::auth::{LoginCredentials, NewRegistration};
use super::credentials::PasswordHash;
use super::error::Error;
use super::network::{Degree, FriendNetworkEntry};
use super::user::{DisplayName, EmailAddress, User, UserId};

/// Persistence errors raised by [`SocialGraphRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphPersistenceError {
    /// Repository connection could not be established.
    #[error("social graph connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("social graph query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A user with the given email already exists.
    #[error("a user with this email already exists")]
    DuplicateEmail,
    /// The directed friendship edge already exists.
    #[error("this friendship already exists")]
    DuplicateEdge,
    /// One of the edge endpoints does not reference a stored user.
    #[error("friendship endpoint does not exist")]
    MissingEndpoint,
}

impl GraphPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Insert payload for a new user row.
///
/// Carries already-validated values plus hashed credential material; the
/// store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    /// Validated display name.
    pub name: DisplayName,
    /// Validated, globally unique email.
    pub email: EmailAddress,
    /// Hashed credential material.
    pub password_hash: PasswordHash,
}

/// A stored user together with its credential material.
///
/// Only the login flow sees this type; everything else works with [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// The public identity.
    pub user: User,
    /// Hashed credential material for verification.
    pub password_hash: PasswordHash,
}

/// Persistence port for the social graph: users plus directed friendship
/// edges.
///
/// ## Contract
/// - Mutations are durable before the call returns.
/// - Uniqueness (email, edge pair) is enforced by the store, not by callers;
///   two racing duplicate inserts resolve with exactly one
///   `Duplicate*` failure.
/// - `outgoing_friends` returns the target user of every edge whose source
///   is in `sources`, ordered by target id. Duplicate targets (reachable
///   from several sources) are returned as-is; deduplication is the
///   traversal's concern.
#[async_trait]
pub trait SocialGraphRepository: Send + Sync {
    /// Insert a new user, returning the stored identity with its assigned id.
    async fn create_user(&self, new_user: &NewUserRecord) -> Result<User, GraphPersistenceError>;

    /// Fetch a user with credential material by exact, case-sensitive email.
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, GraphPersistenceError>;

    /// Fetch a user's public identity by id.
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, GraphPersistenceError>;

    /// Insert the directed friendship edge `source -> target`.
    async fn insert_friendship(
        &self,
        source: UserId,
        target: UserId,
    ) -> Result<(), GraphPersistenceError>;

    /// Fetch the next traversal layer: targets of all edges leaving `sources`.
    async fn outgoing_friends(
        &self,
        sources: &[UserId],
    ) -> Result<Vec<User>, GraphPersistenceError>;
}

/// Driving port for account use-cases (registration, login, profile).
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new account, failing with a conflict on duplicate email.
    async fn register(&self, registration: &NewRegistration) -> Result<User, Error>;

    /// Authenticate credentials, returning the account's id on success.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Fetch the profile for an authenticated user.
    async fn fetch_profile(&self, id: UserId) -> Result<User, Error>;
}

/// Driving port for the friendship edge mutation.
#[async_trait]
pub trait FriendshipCommand: Send + Sync {
    /// Add a directed friendship from `user` to the account owning
    /// `friend_email`. The reverse edge is never created.
    async fn add_friend(&self, user: UserId, friend_email: &EmailAddress) -> Result<(), Error>;
}

/// Driving port for the friend-network traversal.
#[async_trait]
pub trait FriendNetworkQuery: Send + Sync {
    /// Compute the bounded friend network for `root`, ordered ascending by
    /// degree.
    async fn explore(
        &self,
        root: UserId,
        max_degree: Degree,
    ) -> Result<Vec<FriendNetworkEntry>, Error>;
}
