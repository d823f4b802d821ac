//! RSVP domain: the record model, submission validation, and the service
//! that ties them to a storage backend.

mod model;
mod service;
pub mod validate;

pub use model::{RsvpFields, RsvpRecord};
pub use service::{RsvpError, RsvpService};
