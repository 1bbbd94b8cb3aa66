//! Document store module.
//!
//! This module handles:
//! - Entity and wire-record types for both collections
//! - The `DocumentStore` seam the API layer is written against
//! - MongoDB-backed store client
//! - In-memory store for testing

pub mod memory;
pub mod mongo;
pub mod types;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::{MemoryStore, MemoryStoreConfig};
pub use mongo::MongoStore;
pub use types::{
    ContactForm, ContactMessage, ContactStatus, StatusCheck, StatusCheckCreate,
};

/// Collection holding status checks.
pub const STATUS_CHECKS_COLLECTION: &str = "status_checks";

/// Collection holding contact-form submissions.
pub const CONTACT_MESSAGES_COLLECTION: &str = "contact_messages";

/// Maximum number of status checks returned by a single list call.
pub const STATUS_LIST_LIMIT: i64 = 1000;

/// Persistence operations used by the API layer.
///
/// The process owns one implementation for its whole lifetime and hands a
/// shared handle into each request context.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a status check.
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError>;

    /// Fetch up to `limit` status checks in the store's natural order.
    async fn list_status_checks(&self, limit: i64) -> Result<Vec<StatusCheck>, StoreError>;

    /// Persist a contact message.
    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), StoreError>;

    /// Round-trip a ping to the store.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the underlying connection. Called exactly once, at shutdown.
    async fn close(&self);
}
