//! In-memory association repository
//!
//! Mirrors the Postgres table: sequential ids from 1, unique email,
//! column widths of 255/100 characters. Error messages match what
//! Postgres reports for the same failures.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AssociationRepository;
use crate::db::StorageError;
use crate::models::{Association, NewAssociation, DEAL_ID_MAX_LEN, EMAIL_MAX_LEN};

const EMAIL_CONSTRAINT: &str = "associations_email_key";

/// In-memory store for development and testing.
///
/// Data is not persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssociationRepository {
    inner: Arc<RwLock<Table>>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Association>,
    last_id: i32,
}

impl MemoryAssociationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_width(value: &str, max: usize) -> Result<(), StorageError> {
    if value.chars().count() > max {
        return Err(StorageError::Backend(format!(
            "value too long for type character varying({})",
            max
        )));
    }
    Ok(())
}

#[async_trait]
impl AssociationRepository for MemoryAssociationRepository {
    async fn create(&self, new: &NewAssociation) -> Result<Association, StorageError> {
        check_width(new.email(), EMAIL_MAX_LEN)?;
        check_width(new.deal_id(), DEAL_ID_MAX_LEN)?;

        let mut table = self.inner.write().await;
        if table.rows.iter().any(|row| row.email == new.email()) {
            return Err(StorageError::ConstraintViolation {
                constraint: Some(EMAIL_CONSTRAINT.to_owned()),
                message: format!(
                    "duplicate key value violates unique constraint \"{}\"",
                    EMAIL_CONSTRAINT
                ),
            });
        }

        table.last_id += 1;
        let row = Association {
            id: table.last_id,
            email: new.email().to_owned(),
            deal_id: new.deal_id().to_owned(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Association>, StorageError> {
        Ok(self.inner.read().await.rows.clone())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
