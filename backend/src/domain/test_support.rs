//! In-memory social graph used by domain and handler tests.
//!
//! Mirrors the store contract closely enough for traversal and conflict
//! tests: sequential id assignment, case-sensitive unique emails, unique
//! directed edges with existence-checked endpoints, and layer queries
//! ordered by target id.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::credentials::{PasswordHash, hash_password};
use super::ports::{GraphPersistenceError, NewUserRecord, SocialGraphRepository, UserRecord};
use super::user::{DisplayName, EmailAddress, User, UserId};

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, StoredUser>,
    edges: BTreeSet<(i64, i64)>,
}

struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

/// Mutex-guarded in-memory implementation of [`SocialGraphRepository`].
#[derive(Default)]
pub(crate) struct InMemorySocialGraph {
    state: Mutex<State>,
}

impl InMemorySocialGraph {
    /// Seed a user, panicking on invalid fixture data.
    pub(crate) fn seed_user(&self, name: &str, email: &str) -> User {
        let mut state = self.state.lock().expect("state lock");
        state.next_id += 1;
        let id = state.next_id;
        let user = User::new(
            UserId::new(id),
            DisplayName::new(name).expect("valid fixture name"),
            EmailAddress::new(email).expect("valid fixture email"),
        );
        state.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: hash_password("fixture"),
            },
        );
        user
    }

    /// Seed a directed edge, panicking if it already exists.
    pub(crate) fn seed_edge(&self, source: UserId, target: UserId) {
        let mut state = self.state.lock().expect("state lock");
        let inserted = state.edges.insert((source.as_i64(), target.as_i64()));
        assert!(inserted, "fixture edge {source}->{target} already present");
    }
}

#[async_trait]
impl SocialGraphRepository for InMemorySocialGraph {
    async fn create_user(&self, new_user: &NewUserRecord) -> Result<User, GraphPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if state
            .users
            .values()
            .any(|stored| stored.user.email() == &new_user.email)
        {
            return Err(GraphPersistenceError::DuplicateEmail);
        }
        state.next_id += 1;
        let id = state.next_id;
        let user = User::new(UserId::new(id), new_user.name.clone(), new_user.email.clone());
        state.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: new_user.password_hash.clone(),
            },
        );
        Ok(user)
    }

    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, GraphPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.email() == email)
            .map(|stored| UserRecord {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, GraphPersistenceError> {
        let state = self.state.lock().expect("state lock");
        Ok(state.users.get(&id.as_i64()).map(|stored| stored.user.clone()))
    }

    async fn insert_friendship(
        &self,
        source: UserId,
        target: UserId,
    ) -> Result<(), GraphPersistenceError> {
        let mut state = self.state.lock().expect("state lock");
        if !state.users.contains_key(&source.as_i64())
            || !state.users.contains_key(&target.as_i64())
        {
            return Err(GraphPersistenceError::MissingEndpoint);
        }
        if !state.edges.insert((source.as_i64(), target.as_i64())) {
            return Err(GraphPersistenceError::DuplicateEdge);
        }
        Ok(())
    }

    async fn outgoing_friends(
        &self,
        sources: &[UserId],
    ) -> Result<Vec<User>, GraphPersistenceError> {
        let state = self.state.lock().expect("state lock");
        let source_ids: BTreeSet<i64> = sources.iter().map(|id| id.as_i64()).collect();
        let mut targets: Vec<i64> = state
            .edges
            .iter()
            .filter(|(source, _)| source_ids.contains(source))
            .map(|&(_, target)| target)
            .collect();
        targets.sort_unstable();
        targets.dedup();
        Ok(targets
            .into_iter()
            .filter_map(|target| state.users.get(&target))
            .map(|stored| stored.user.clone())
            .collect())
    }
}
