//! Configuration for the RSVP server
//!
//! Every value has a compile-time default and can be overridden at runtime via
//! a dedicated environment variable.

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Which storage backend holds the RSVP collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// One JSON array file, rewritten on every change.
    Json,
    /// A single SQLite table.
    Sqlite,
}

impl StorageKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" | "file" => Some(Self::Json),
            "sqlite" | "db" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

/// Get the data directory for persistence.
///
/// Priority:
/// 1. RSVP_DATA_DIR env variable if set
/// 2. ./data as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RSVP_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_DATA_DIR)
}

/// Get the storage backend.
///
/// Priority:
/// 1. RSVP_STORAGE env variable (`json` or `sqlite`); unknown values fall
///    back to json with a warning
/// 2. json as fallback
pub fn get_storage_kind() -> StorageKind {
    match std::env::var("RSVP_STORAGE") {
        Ok(value) => parse_storage_kind(&value),
        Err(_) => StorageKind::Json,
    }
}

fn parse_storage_kind(value: &str) -> StorageKind {
    StorageKind::parse(value).unwrap_or_else(|| {
        tracing::warn!(value, "Unknown RSVP_STORAGE, using json");
        StorageKind::Json
    })
}

/// Get the address to listen on.
///
/// Priority:
/// 1. RSVP_BIND_ADDR env variable if set (falls back to the default if it
///    cannot be parsed as a socket address)
/// 2. 127.0.0.1:3000 as fallback
pub fn get_bind_addr() -> SocketAddr {
    let default = || {
        DEFAULT_BIND_ADDR
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000)))
    };
    match std::env::var("RSVP_BIND_ADDR") {
        Ok(addr) => addr.parse().unwrap_or_else(|_| {
            tracing::warn!(addr = %addr, "Invalid RSVP_BIND_ADDR, using default");
            default()
        }),
        Err(_) => default(),
    }
}

/// Get the directory holding the front-end page and its assets.
///
/// Priority:
/// 1. RSVP_PUBLIC_DIR env variable if set
/// 2. the `public` directory next to the server crate
pub fn get_public_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RSVP_PUBLIC_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

/// Whether to answer cross-origin requests. Off unless RSVP_CORS is `1` or
/// `true`.
pub fn get_cors_enabled() -> bool {
    std::env::var("RSVP_CORS")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
