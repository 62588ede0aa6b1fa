//! HTTP inbound adapter exposing the REST endpoints.

pub mod accounts;
pub mod error;
pub mod friends;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
