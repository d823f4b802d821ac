use serde::{Deserialize, Serialize};

/// A persisted RSVP entry in its wire shape.
///
/// `updated_at` is skipped entirely when absent so that clients can tell a
/// never-edited entry apart from an edited one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRecord {
    pub id: String,
    pub guest_name: String,
    pub guest_count: u32,
    #[serde(default)]
    pub notes: String,
    pub contributions: Vec<String>,
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
}

/// The mutable part of a record, as produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpFields {
    pub guest_name: String,
    pub guest_count: u32,
    pub notes: String,
    pub contributions: Vec<String>,
}

impl RsvpRecord {
    pub fn new(id: String, fields: RsvpFields, created_at: u64) -> Self {
        Self {
            id,
            guest_name: fields.guest_name,
            guest_count: fields.guest_count,
            notes: fields.notes,
            contributions: fields.contributions,
            created_at,
            updated_at: None,
        }
    }

    /// Replace every mutable field and stamp `updated_at`.
    ///
    /// The stamp never goes below `created_at`, even if the wall clock stepped
    /// backwards between creation and update.
    pub fn apply(&mut self, fields: RsvpFields, now: u64) {
        self.guest_name = fields.guest_name;
        self.guest_count = fields.guest_count;
        self.notes = fields.notes;
        self.contributions = fields.contributions;
        self.updated_at = Some(now.max(self.created_at));
    }
}
