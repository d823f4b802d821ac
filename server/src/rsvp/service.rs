use serde_json::Value;

use super::validate::{validate, ValidationError};
use super::{RsvpFields, RsvpRecord};
use crate::persistence::{generate_rsvp_id, now_millis, PersistenceError, RsvpRepository};

/// Errors surfaced by [`RsvpService`].
#[derive(Debug, thiserror::Error)]
pub enum RsvpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("RSVP not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] PersistenceError),
}

/// Orchestrates validation and storage. Ids and timestamps are assigned here,
/// never taken from the client.
pub struct RsvpService<R> {
    repo: R,
}

impl<R: RsvpRepository> RsvpService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create(&self, raw: &Value) -> Result<RsvpRecord, RsvpError> {
        let fields = validate(raw)?;
        let record = RsvpRecord::new(generate_rsvp_id(), fields, now_millis());
        self.repo.insert(&record).await?;
        tracing::info!(id = %record.id, guests = record.guest_count, "RSVP created");
        Ok(record)
    }

    pub async fn list(&self) -> Vec<RsvpRecord> {
        let records = self.repo.list_all().await;
        tracing::debug!(count = records.len(), "Listed RSVPs");
        records
    }

    #[cfg(test)]
    pub async fn find(&self, id: &str) -> Result<Option<RsvpRecord>, RsvpError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn replace(&self, id: &str, raw: &Value) -> Result<RsvpRecord, RsvpError> {
        let fields: RsvpFields = validate(raw)?;
        let record = self
            .repo
            .update(id, &fields)
            .await?
            .ok_or_else(|| RsvpError::NotFound(id.to_string()))?;
        tracing::info!(id, "RSVP updated");
        Ok(record)
    }

    pub async fn remove(&self, id: &str) -> Result<bool, RsvpError> {
        let removed = self.repo.delete_by_id(id).await?;
        if removed {
            tracing::info!(id, "RSVP removed");
        }
        Ok(removed)
    }
}
