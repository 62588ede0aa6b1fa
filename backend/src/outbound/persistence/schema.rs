//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key, assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        /// Display name (max 50 characters).
        name -> Varchar,
        /// Email address, unique across all accounts.
        email -> Varchar,
        /// Encoded password hash.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed friendship edges between accounts.
    friendships (source_id, target_id) {
        /// Account that recorded the friendship.
        source_id -> Int8,
        /// Account the friendship points at.
        target_id -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, friendships);
