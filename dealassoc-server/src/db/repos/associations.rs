//! Postgres association repository
//!
//! - create: plain INSERT, duplicates rejected by `associations_email_key`
//! - list: single SELECT ordered by id
//!
//! The repository owns its pool: `connect` opens it at startup and
//! `close` releases it on shutdown.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::AssociationRepository;
use crate::db::{migrations, StorageError};
use crate::models::{Association, NewAssociation};

/// Pool size when none is configured. One request holds at most one
/// connection, so a handful covers a single small service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Association repository backed by a Postgres pool
#[derive(Clone)]
pub struct PgAssociationRepository {
    pool: PgPool,
}

impl PgAssociationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool of at most `max_connections` against `database_url`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let repo = PgAssociationRepository::connect(&url, DEFAULT_MAX_CONNECTIONS).await?;
    /// repo.migrate().await?;
    /// ```
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        tracing::debug!(max_connections, "Opening association store");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Create the associations table if missing.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        migrations::run(&self.pool).await
    }

    /// Wait for checked-out connections and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Association store closed");
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AssociationRepository for PgAssociationRepository {
    async fn create(&self, new: &NewAssociation) -> Result<Association, StorageError> {
        let row = sqlx::query_as::<_, Association>(
            r#"
            INSERT INTO associations (email, deal_id)
            VALUES ($1, $2)
            RETURNING id, email, deal_id
            "#,
        )
        .bind(new.email())
        .bind(new.deal_id())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Association>, StorageError> {
        let rows = sqlx::query_as::<_, Association>(
            r#"
            SELECT id, email, deal_id
            FROM associations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
