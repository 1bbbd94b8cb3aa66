//! Unified error types for the backend.

use thiserror::Error;

/// Unified error type for the backend.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Document store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Notification error.
    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver-level failure (connection, write, query).
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored timestamp is not a valid ISO-8601 string.
    #[error("malformed stored timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// The raw stored value.
        value: String,
        /// The underlying parse failure.
        source: chrono::ParseError,
    },
}

/// Mail composition and delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Message could not be assembled.
    #[error("failed to compose message: {0}")]
    Compose(#[from] lettre::error::Error),

    /// A mailbox address could not be parsed.
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// SMTP transport failure (network, auth, protocol).
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// Delivery failed for a reason outside the transport layer.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
