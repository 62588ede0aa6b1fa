//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling. Adapters are
//! thin: they translate between Diesel row structs and domain types, and map
//! database errors to port error variants. Row structs (`models.rs`) and
//! schema definitions (`schema.rs`) never leak out of this module.

mod diesel_social_graph_repository;
mod models;
mod pool;
mod schema;

pub use diesel_social_graph_repository::DieselSocialGraphRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
