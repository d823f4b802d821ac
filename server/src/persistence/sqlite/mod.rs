//! SQLite-backed repository implementation.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: one writer and multiple concurrent readers.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   automatically when [`Database::open`] is called. The schema is idempotent.
//!
//! ## Repository
//!
//! [`SqliteRsvpRepository`] holds a `SqlitePool` and implements
//! [`RsvpRepository`](crate::persistence::RsvpRepository). Every value is a
//! bound parameter. The `contributions` list is stored as a JSON array in one
//! TEXT column and round-tripped through [`helpers`].
//!
//! ## JSON migration
//!
//! [`migrate_json_to_sqlite`] performs a one-time, idempotent import of an
//! existing `rsvps.json` snapshot. It is called from `main.rs` before the
//! server starts accepting requests. The JSON file is not deleted.

mod database;
mod migrate_json;
mod rsvp_repo;
pub(crate) mod helpers;

pub use database::{Database, DATABASE_FILE};
pub use migrate_json::migrate_json_to_sqlite;
pub use rsvp_repo::SqliteRsvpRepository;
