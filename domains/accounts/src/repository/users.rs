//! User repository
//!
//! Postgres-backed Identity Store. Uses runtime `sqlx::query_as` so the
//! workspace builds without a live database.

use async_trait::async_trait;
use cinedex_auth::{Identity, IdentityStore, IdentityStoreError};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

impl From<UserRow> for Identity {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password,
        }
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(err: sqlx::Error) -> IdentityStoreError {
    IdentityStoreError::Unavailable(err.to_string())
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, IdentityStoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = id, "Failed to load user");
            unavailable(e)
        })?;

        Ok(row.map(Identity::from))
    }

    /// Emails compare case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityStoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, password
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load user by email");
            unavailable(e)
        })?;

        Ok(row.map(Identity::from))
    }
}
