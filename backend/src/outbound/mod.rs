//! Outbound adapters: infrastructure behind the domain's driven ports.

pub mod persistence;
