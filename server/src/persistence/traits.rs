//! Async repository trait for the RSVP collection.
//!
//! Both the JSON snapshot store and the SQLite repository implement
//! [`RsvpRepository`], and the service is generic over it (static dispatch).
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send`, which axum handlers and `tokio::spawn`
//! require.

use super::PersistenceError;
use crate::rsvp::{RsvpFields, RsvpRecord};
use std::future::Future;

/// Durable storage for RSVP records.
///
/// Every operation is atomic with respect to concurrent callers of the same
/// instance.
pub trait RsvpRepository: Send + Sync + 'static {
    /// All records, ascending by `created_at`.
    ///
    /// Never fails: an unreadable medium is logged and reported as an empty
    /// collection.
    fn list_all(&self) -> impl Future<Output = Vec<RsvpRecord>> + Send;

    /// Store a new record. Fails with [`PersistenceError::DuplicateId`] if the
    /// id is already taken.
    fn insert(
        &self,
        record: &RsvpRecord,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<RsvpRecord>, PersistenceError>> + Send;

    /// Replace the mutable fields of a record and stamp `updated_at`.
    /// Returns `None` if no record has this id.
    fn update(
        &self,
        id: &str,
        fields: &RsvpFields,
    ) -> impl Future<Output = Result<Option<RsvpRecord>, PersistenceError>> + Send;

    /// Remove a record. Returns whether anything was removed.
    fn delete_by_id(&self, id: &str) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
}
