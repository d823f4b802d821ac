//! Conversions between the wire record and the `rsvps` row.
//!
//! `contributions` is the only structured field; it is stored as a JSON array
//! in a single TEXT column.

use crate::rsvp::RsvpRecord;

/// Column list shared by every query that reads a full row.
pub const RSVP_COLUMNS: &str =
    "id, guest_name, guest_count, notes, contributions, created_at, updated_at";

/// Row type for `rsvps` queries, mapped via `sqlx::FromRow`.
#[derive(Debug, sqlx::FromRow)]
pub struct RsvpRow {
    pub id: String,
    pub guest_name: String,
    pub guest_count: i64,
    pub notes: String,
    pub contributions: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl From<RsvpRow> for RsvpRecord {
    fn from(row: RsvpRow) -> Self {
        let contributions = decode_contributions(&row.id, &row.contributions);
        Self {
            id: row.id,
            guest_name: row.guest_name,
            guest_count: u32::try_from(row.guest_count).unwrap_or(1),
            notes: row.notes,
            contributions,
            created_at: row.created_at as u64,
            updated_at: row.updated_at.map(|v| v as u64),
        }
    }
}

/// Encode contributions for the `contributions` column.
pub fn encode_contributions(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Decode the `contributions` column. A malformed value is logged and read
/// as an empty list rather than failing the whole read.
pub fn decode_contributions(id: &str, raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(id, error = %e, "Unreadable contributions column, treating as empty");
            Vec::new()
        }
    }
}
