//! Backend library modules.
//!
//! Hexagonal layout: `domain` holds the business rules behind driving and
//! driven ports, `inbound` adapts HTTP onto the driving ports, and `outbound`
//! implements the driven ports against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
