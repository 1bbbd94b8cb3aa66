//! MongoDB-backed document store client.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::{debug, instrument};

use crate::error::StoreError;

use super::types::{ContactMessage, ContactMessageRecord, StatusCheck, StatusCheckRecord};
use super::{DocumentStore, CONTACT_MESSAGES_COLLECTION, STATUS_CHECKS_COLLECTION};

/// How long connection establishment and server selection may take before
/// an operation fails instead of hanging.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Long-lived MongoDB client, opened once at process start.
#[derive(Debug, Clone)]
pub struct MongoStore {
    /// Driver client; internally pooled and safe for concurrent use.
    client: Client,
    /// The configured database.
    db: Database,
}

impl MongoStore {
    /// Connect to the store from a connection string and database name.
    pub async fn connect(mongo_url: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(mongo_url).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options)?;
        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Number of documents currently in each collection (estimated).
    pub async fn collection_counts(&self) -> Result<(u64, u64), StoreError> {
        let status = self
            .status_checks()
            .estimated_document_count()
            .await?;
        let contacts = self
            .contact_messages()
            .estimated_document_count()
            .await?;
        Ok((status, contacts))
    }

    fn status_checks(&self) -> Collection<StatusCheckRecord> {
        self.db.collection(STATUS_CHECKS_COLLECTION)
    }

    fn contact_messages(&self) -> Collection<ContactMessageRecord> {
        self.db.collection(CONTACT_MESSAGES_COLLECTION)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[instrument(skip(self, check), fields(id = %check.id))]
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.status_checks()
            .insert_one(StatusCheckRecord::from(check))
            .await?;
        debug!("status check persisted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_status_checks(&self, limit: i64) -> Result<Vec<StatusCheck>, StoreError> {
        // Natural return order; the store's internal _id never leaves the
        // driver.
        let records: Vec<StatusCheckRecord> = self
            .status_checks()
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        records.into_iter().map(StatusCheck::try_from).collect()
    }

    #[instrument(skip(self, message), fields(id = %message.id))]
    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        self.contact_messages()
            .insert_one(ContactMessageRecord::from(message))
            .await?;
        debug!("contact message persisted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn close(&self) {
        // Client handles are reference counted; shutting down a clone tears
        // down the shared pool after outstanding operations finish.
        self.client.clone().shutdown().await;
    }
}
