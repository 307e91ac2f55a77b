//! Schema setup for the associations table

use sqlx::PgPool;

use super::StorageError;

/// Create the associations table if it does not exist.
///
/// Email uniqueness lives here as a named constraint so concurrent
/// conflicting inserts are serialized by Postgres.
pub async fn run(pool: &PgPool) -> Result<(), StorageError> {
    tracing::info!("Running association migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS associations (
            id SERIAL PRIMARY KEY,
            email VARCHAR(255) NOT NULL,
            deal_id VARCHAR(100) NOT NULL,
            CONSTRAINT associations_email_key UNIQUE (email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Association migrations complete");
    Ok(())
}
