//! Entity and wire-record types for the two document collections.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// A recorded liveness probe from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    /// Unique identifier, generated on creation.
    pub id: String,
    /// Name reported by the probing client.
    pub client_name: String,
    /// Creation instant (UTC).
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    /// Create a status check with a fresh id and the current UTC instant.
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}

/// Request body for `POST /api/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    /// Name reported by the probing client.
    pub client_name: String,
}

/// Request body for `POST /api/contact`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address. Opaque to this layer; the mail relay may
    /// reject malformed addresses downstream.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: String,
    /// Optional location.
    #[serde(default)]
    pub address: String,
    /// Message body.
    pub comment: String,
}

/// Triage state of a contact message. Currently every message is `New`;
/// the downstream workflow that would advance it does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    /// Freshly submitted, not yet triaged.
    New,
}

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Unique identifier, generated on creation.
    pub id: String,
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address.
    pub email: String,
    /// Phone number, empty when not provided.
    pub phone: String,
    /// Location, empty when not provided.
    pub address: String,
    /// Message body.
    pub comment: String,
    /// Submission instant (UTC).
    pub timestamp: DateTime<Utc>,
    /// Triage state.
    pub status: ContactStatus,
}

impl ContactMessage {
    /// Build a message from a submitted form, generating id and timestamp.
    pub fn from_form(form: ContactForm) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            comment: form.comment,
            timestamp: Utc::now(),
            status: ContactStatus::New,
        }
    }
}

/// Serialize a timestamp the way documents store it.
///
/// MongoDB documents carry the timestamp as an ISO-8601 string rather than a
/// native datetime; microsecond precision survives the round trip.
fn timestamp_to_string(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp string back into a UTC instant.
fn timestamp_from_string(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| StoreError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

/// Wire form of [`StatusCheck`] as stored in the `status_checks` collection.
///
/// Lenient on read: unknown fields (the store's own `_id` included) are
/// dropped instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheckRecord {
    /// Unique identifier.
    pub id: String,
    /// Name reported by the probing client.
    pub client_name: String,
    /// ISO-8601 string form of the creation instant.
    pub timestamp: String,
}

impl From<&StatusCheck> for StatusCheckRecord {
    fn from(check: &StatusCheck) -> Self {
        Self {
            id: check.id.clone(),
            client_name: check.client_name.clone(),
            timestamp: timestamp_to_string(&check.timestamp),
        }
    }
}

impl TryFrom<StatusCheckRecord> for StatusCheck {
    type Error = StoreError;

    fn try_from(record: StatusCheckRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            client_name: record.client_name,
            timestamp: timestamp_from_string(&record.timestamp)?,
        })
    }
}

/// Wire form of [`ContactMessage`] as stored in the `contact_messages`
/// collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageRecord {
    /// Unique identifier.
    pub id: String,
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address.
    pub email: String,
    /// Phone number, empty when not provided.
    pub phone: String,
    /// Location, empty when not provided.
    pub address: String,
    /// Message body.
    pub comment: String,
    /// ISO-8601 string form of the submission instant.
    pub timestamp: String,
    /// Triage state.
    pub status: ContactStatus,
}

impl From<&ContactMessage> for ContactMessageRecord {
    fn from(message: &ContactMessage) -> Self {
        Self {
            id: message.id.clone(),
            name: message.name.clone(),
            email: message.email.clone(),
            phone: message.phone.clone(),
            address: message.address.clone(),
            comment: message.comment.clone(),
            timestamp: timestamp_to_string(&message.timestamp),
            status: message.status,
        }
    }
}

impl TryFrom<ContactMessageRecord> for ContactMessage {
    type Error = StoreError;

    fn try_from(record: ContactMessageRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            address: record.address,
            comment: record.comment,
            timestamp: timestamp_from_string(&record.timestamp)?,
            status: record.status,
        })
    }
}
