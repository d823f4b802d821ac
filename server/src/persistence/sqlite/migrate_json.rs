use std::path::Path;

use sqlx::SqlitePool;
use tracing::{info, warn};

use super::helpers::encode_contributions;
use crate::persistence::{JsonStore, PersistenceError, SNAPSHOT_FILE};
use crate::rsvp::RsvpRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub skipped: bool,
    pub imported: u64,
}

/// Import `<data_dir>/rsvps.json` into an empty `rsvps` table.
///
/// Runs at most once per database: if the table already has rows the import
/// is skipped. Records repeating an earlier id are skipped with a warning; any
/// other rejected record aborts the whole import. The JSON file is left in place.
pub async fn migrate_json_to_sqlite(
    pool: &SqlitePool,
    data_dir: &Path,
) -> Result<MigrationReport, PersistenceError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rsvps")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(existing, "SQLite already contains RSVPs, skipping JSON migration");
        return Ok(MigrationReport {
            skipped: true,
            imported: 0,
        });
    }

    let snapshot = data_dir.join(SNAPSHOT_FILE);
    let records = JsonStore::<RsvpRecord>::new(snapshot.clone())
        .load_all()
        .await?;
    if records.is_empty() {
        return Ok(MigrationReport {
            skipped: false,
            imported: 0,
        });
    }

    info!(path = %snapshot.display(), records = records.len(), "Importing JSON RSVPs into SQLite");

    let mut tx = pool.begin().await?;
    let mut imported = 0;
    for record in &records {
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
        .bind(i64::from(record.guest_count.max(1)))
        .bind(&record.notes)
        .bind(encode_contributions(&record.contributions))
        .bind(record.created_at as i64)
        .bind(record.updated_at.map(|v| v as i64))
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            warn!(id = %record.id, "Duplicate RSVP id in JSON snapshot, keeping the first");
        }
        imported += result.rows_affected();
    }
    tx.commit().await?;

    info!(imported, "JSON migration complete");
    Ok(MigrationReport {
        skipped: false,
        imported,
    })
}
