//! PostgreSQL-backed [`SocialGraphRepository`] implementation using Diesel.
//!
//! Stores accounts and directed friendship edges, and serves the layered
//! lookup the traversal service issues one query per hop. All database
//! operations are async via `diesel-async`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    GraphPersistenceError, NewUserRecord, SocialGraphRepository, UserRecord,
};
use crate::domain::{EmailAddress, PasswordHash, User, UserId};

use super::models::{NewFriendshipRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{friendships, users};

/// Diesel-backed implementation of the [`SocialGraphRepository`] port.
#[derive(Clone)]
pub struct DieselSocialGraphRepository {
    pool: DbPool,
}

impl DieselSocialGraphRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GraphPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            GraphPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors that carry no operation-specific meaning.
fn map_diesel_error(error: diesel::result::Error) -> GraphPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            GraphPersistenceError::connection("database connection error")
        }
        _ => GraphPersistenceError::query("database error"),
    }
}

fn row_to_user(row: &UserRow) -> Result<User, GraphPersistenceError> {
    User::try_from_parts(row.id, &row.name, &row.email).map_err(|err| {
        GraphPersistenceError::query(format!("corrupted user record in database: {err}"))
    })
}

#[async_trait]
impl SocialGraphRepository for DieselSocialGraphRepository {
    async fn create_user(
        &self,
        new_user: &NewUserRecord,
    ) -> Result<User, GraphPersistenceError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow {
                name: new_user.name.as_str(),
                email: new_user.email.as_str(),
                password_hash: new_user.password_hash.as_str(),
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    GraphPersistenceError::DuplicateEmail
                }
                other => map_diesel_error(other),
            })?;

        row_to_user(&row)
    }

    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, GraphPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            Ok(UserRecord {
                user: row_to_user(&row)?,
                password_hash: PasswordHash::from_storage(row.password_hash),
            })
        })
        .transpose()
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, GraphPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_i64())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row_to_user(&row)).transpose()
    }

    async fn insert_friendship(
        &self,
        source: UserId,
        target: UserId,
    ) -> Result<(), GraphPersistenceError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(friendships::table)
            .values(NewFriendshipRow {
                source_id: source.as_i64(),
                target_id: target.as_i64(),
            })
            .execute(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    GraphPersistenceError::DuplicateEdge
                }
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    GraphPersistenceError::MissingEndpoint
                }
                other => map_diesel_error(other),
            })?;

        Ok(())
    }

    async fn outgoing_friends(
        &self,
        sources: &[UserId],
    ) -> Result<Vec<User>, GraphPersistenceError> {
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let source_ids: Vec<i64> = sources.iter().map(|id| id.as_i64()).collect();

        // One hop in one query: edge targets joined back to their accounts,
        // deduplicated and ordered so traversal output is deterministic.
        let rows: Vec<UserRow> = friendships::table
            .inner_join(users::table.on(users::id.eq(friendships::target_id)))
            .filter(friendships::source_id.eq_any(&source_ids))
            .select(UserRow::as_select())
            .distinct()
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.iter().map(row_to_user).collect()
    }
}
