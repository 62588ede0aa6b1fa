//! Friend-network traversal and degree labelling.
//!
//! The traversal is a queue-based breadth-first search over the directed
//! friendship relation, bounded by a maximum hop count. Each reachable user
//! is labelled with the minimum number of hops from the root; BFS discovery
//! order makes that minimum fall out of the first visit, so no per-node
//! comparison is needed. The engine holds no state between calls; every
//! query is a function of the store's current contents.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::error::Error;
use super::ports::{FriendNetworkQuery, GraphPersistenceError, SocialGraphRepository};
use super::user::{User, UserId};

/// Validation errors for [`Degree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegreeValidationError {
    /// Zero hops would only ever contain the root, which is excluded.
    #[error("degree must be at least 1")]
    ZeroHops,
}

/// Number of directed hops separating two users.
///
/// ## Invariants
/// - Always at least 1; "zero hops away" is the root itself, which never
///   appears in traversal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Degree(u32);

impl Degree {
    /// Smallest representable separation: a direct friend.
    pub const MIN: Self = Self(1);

    /// Default traversal bound used by `GET /v1/friends`.
    pub const DEFAULT_MAX: Self = Self(3);

    /// Validate and construct a [`Degree`] from a raw hop count.
    pub const fn new(hops: u32) -> Result<Self, DegreeValidationError> {
        if hops == 0 {
            return Err(DegreeValidationError::ZeroHops);
        }
        Ok(Self(hops))
    }

    /// Raw hop count.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Ordinal label shown to clients.
    ///
    /// Uses the simplified rule the product has always shipped: `1st`,
    /// `2nd`, `3rd`, then `{n}th` for everything else -- including `21th`
    /// and `22th`. Changing this would break the frontend's degree parsing,
    /// so the teens/tens special-casing stays out.
    #[must_use]
    pub fn label(self) -> String {
        match self.0 {
            1 => "1st".to_owned(),
            2 => "2nd".to_owned(),
            3 => "3rd".to_owned(),
            n => format!("{n}th"),
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One user in a computed friend network, labelled with its minimum degree.
///
/// Transient: recomputed per query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendNetworkEntry {
    user: User,
    degree: Degree,
}

impl FriendNetworkEntry {
    /// Bundle a discovered user with the degree it was first reached at.
    #[must_use]
    pub const fn new(user: User, degree: Degree) -> Self {
        Self { user, degree }
    }

    /// The discovered user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Minimum hop count from the traversal root.
    #[must_use]
    pub const fn degree(&self) -> Degree {
        self.degree
    }

    /// Consume the entry and yield the discovered user.
    #[must_use]
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Breadth-first traversal engine over a [`SocialGraphRepository`].
#[derive(Clone)]
pub struct FriendNetworkService<R> {
    repo: Arc<R>,
}

impl<R> FriendNetworkService<R> {
    /// Create a new traversal service over the given store.
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_graph_error(error: GraphPersistenceError) -> Error {
    match error {
        GraphPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("social graph unavailable: {message}"))
        }
        GraphPersistenceError::Query { message } => {
            Error::internal(format!("social graph query failed: {message}"))
        }
        // Layer queries never mutate; any uniqueness failure here is a bug.
        other => Error::internal(format!("unexpected social graph failure: {other}")),
    }
}

#[async_trait]
impl<R> FriendNetworkQuery for FriendNetworkService<R>
where
    R: SocialGraphRepository,
{
    /// Walk the graph outward from `root`, one layer per repository call.
    ///
    /// The visited set suppresses cycles (including edges back to the root
    /// and self-loops) and guarantees each user appears exactly once, at its
    /// minimum degree. The loop stops as soon as a layer comes back empty,
    /// so a bound beyond the graph's reach terminates early. An unknown
    /// root simply has no outgoing edges and yields an empty network; the
    /// engine never errors on well-formed input.
    async fn explore(
        &self,
        root: UserId,
        max_degree: Degree,
    ) -> Result<Vec<FriendNetworkEntry>, Error> {
        let mut visited: HashSet<UserId> = HashSet::from([root]);
        let mut frontier: Vec<UserId> = vec![root];
        let mut network: Vec<FriendNetworkEntry> = Vec::new();
        let mut hops = 0u32;

        while hops < max_degree.as_u32() && !frontier.is_empty() {
            hops += 1;
            let layer = self
                .repo
                .outgoing_friends(&frontier)
                .await
                .map_err(map_graph_error)?;

            let mut next_frontier = Vec::new();
            for user in layer {
                // First discovery wins: BFS reaches every node at its
                // minimum hop count, so later sightings are dropped.
                if visited.insert(user.id()) {
                    next_frontier.push(user.id());
                    network.push(FriendNetworkEntry::new(user, Degree(hops)));
                }
            }
            frontier = next_frontier;
        }

        Ok(network)
    }
}
