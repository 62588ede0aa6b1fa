//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Accounts, FriendNetworkQuery, FriendshipCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and profile use-cases.
    pub accounts: Arc<dyn Accounts>,
    /// Friendship edge mutation.
    pub friendships: Arc<dyn FriendshipCommand>,
    /// Friend-network traversal.
    pub network: Arc<dyn FriendNetworkQuery>,
}

impl HttpState {
    /// Bundle the three driving ports consumed by the handlers.
    #[must_use]
    pub fn new(
        accounts: Arc<dyn Accounts>,
        friendships: Arc<dyn FriendshipCommand>,
        network: Arc<dyn FriendNetworkQuery>,
    ) -> Self {
        Self {
            accounts,
            friendships,
            network,
        }
    }
}
