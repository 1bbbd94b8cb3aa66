//! In-memory document store for unit testing.
//!
//! This module provides a store that can be used in tests without a running
//! MongoDB instance. Documents are held in their wire-record form so the
//! string-timestamp round trip is exercised exactly as with the real store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::StoreError;

use super::types::{ContactMessage, ContactMessageRecord, StatusCheck, StatusCheckRecord};
use super::DocumentStore;

/// Configuration for in-memory store behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreConfig {
    /// Whether to fail insert operations.
    pub fail_inserts: bool,
    /// Whether to fail read operations.
    pub fail_reads: bool,
}

/// In-memory store backing both collections with plain vectors.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: MemoryStoreConfig,
    status_checks: Arc<Mutex<Vec<StatusCheckRecord>>>,
    contact_messages: Arc<Mutex<Vec<ContactMessageRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with custom failure behavior.
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Snapshot of the stored status-check records.
    pub fn status_check_records(&self) -> Vec<StatusCheckRecord> {
        self.status_checks.lock().unwrap().clone()
    }

    /// Snapshot of the stored contact-message records.
    pub fn contact_message_records(&self) -> Vec<ContactMessageRecord> {
        self.contact_messages.lock().unwrap().clone()
    }

    /// Insert a raw status-check record, bypassing the entity layer.
    ///
    /// Lets tests plant malformed documents the way a foreign writer could.
    pub fn insert_raw_status_check(&self, record: StatusCheckRecord) {
        self.status_checks.lock().unwrap().push(record);
    }

    fn injected_failure(&self) -> StoreError {
        StoreError::Database(mongodb::error::Error::custom("injected failure"))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        if self.config.fail_inserts {
            return Err(self.injected_failure());
        }
        self.status_checks
            .lock()
            .unwrap()
            .push(StatusCheckRecord::from(check));
        Ok(())
    }

    async fn list_status_checks(&self, limit: i64) -> Result<Vec<StatusCheck>, StoreError> {
        if self.config.fail_reads {
            return Err(self.injected_failure());
        }
        self.status_checks
            .lock()
            .unwrap()
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .map(StatusCheck::try_from)
            .collect()
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        if self.config.fail_inserts {
            return Err(self.injected_failure());
        }
        self.contact_messages
            .lock()
            .unwrap()
            .push(ContactMessageRecord::from(message));
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.config.fail_reads {
            return Err(self.injected_failure());
        }
        Ok(())
    }

    async fn close(&self) {}
}
