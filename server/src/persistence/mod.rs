mod json_store;
mod rsvp_store;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub(crate) mod conformance;

pub(crate) use json_store::JsonStore;

pub use rsvp_store::{RsvpStore, SNAPSHOT_FILE};
pub use traits::RsvpRepository;

use std::time::{SystemTime, UNIX_EPOCH};

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Record already exists: {0}")]
    DuplicateId(String),
}

/// Generate a unique RSVP id: the creation time in base 36 followed by
/// 32 random bits, e.g. `m1x2k9a0-3f9c01ab`.
pub fn generate_rsvp_id() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", to_base36(now_millis()), &random[..8])
}

/// Get the current unix timestamp in milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
