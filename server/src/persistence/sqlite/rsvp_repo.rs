//! SQLite-backed repository for RSVP records.

use sqlx::SqlitePool;

use super::helpers::{encode_contributions, RsvpRow, RSVP_COLUMNS};
use crate::persistence::traits::RsvpRepository;
use crate::persistence::{now_millis, PersistenceError};
use crate::rsvp::{RsvpFields, RsvpRecord};

/// SQLite implementation of [`RsvpRepository`].
///
/// Every operation is a single statement, so SQLite's own statement
/// atomicity is all the locking needed. Concurrent updates and deletes of the
/// same id resolve in commit order.
pub struct SqliteRsvpRepository {
    pool: SqlitePool,
}

impl SqliteRsvpRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<RsvpRecord>, PersistenceError> {
        let rows: Vec<RsvpRow> = sqlx::query_as(&format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps ORDER BY created_at ASC, rowid ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RsvpRecord::from).collect())
    }
}

impl RsvpRepository for SqliteRsvpRepository {
    async fn list_all(&self) -> Vec<RsvpRecord> {
        match self.fetch_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list RSVPs from SQLite");
                vec![]
            }
        }
    }

    async fn insert(&self, record: &RsvpRecord) -> Result<(), PersistenceError> {
        let result = sqlx::query(
            r#"
            INSERT INTO rsvps
                (id, guest_name, guest_count, notes, contributions, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(&record.guest_name)
        .bind(i64::from(record.guest_count))
        .bind(&record.notes)
        .bind(encode_contributions(&record.contributions))
        .bind(record.created_at as i64)
        .bind(record.updated_at.map(|v| v as i64))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::DuplicateId(record.id.clone()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RsvpRecord>, PersistenceError> {
        let row: Option<RsvpRow> =
            sqlx::query_as(&format!("SELECT {RSVP_COLUMNS} FROM rsvps WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(RsvpRecord::from))
    }

    async fn update(
        &self,
        id: &str,
        fields: &RsvpFields,
    ) -> Result<Option<RsvpRecord>, PersistenceError> {
        let row: Option<RsvpRow> = sqlx::query_as(&format!(
            r#"
            UPDATE rsvps
            SET guest_name = ?, guest_count = ?, notes = ?, contributions = ?,
                updated_at = MAX(?, created_at)
            WHERE id = ?
            RETURNING {RSVP_COLUMNS}
            "#
        ))
        .bind(&fields.guest_name)
        .bind(i64::from(fields.guest_count))
        .bind(&fields.notes)
        .bind(encode_contributions(&fields.contributions))
        .bind(now_millis() as i64)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RsvpRecord::from))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM rsvps WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
