//! Best-effort contact notifications.
//!
//! This module handles:
//! - The `Notifier` seam the contact handler is written against
//! - SMTP delivery via a TLS relay
//! - No-op and recording notifiers for unconfigured deployments and tests
//!
//! Notification outcomes are observed only for logging; delivery failure
//! never changes the result of the request that triggered it.

pub mod mock;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, NotifyError};
use crate::store::ContactMessage;

pub use mock::{NoopNotifier, RecordingNotifier};
pub use smtp::SmtpNotifier;

/// Outbound notification hook for contact submissions.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Relay a freshly persisted contact message.
    async fn contact_submitted(&self, message: &ContactMessage) -> Result<(), NotifyError>;
}

/// Select a notifier from configuration.
///
/// All four SMTP credentials present yields a live SMTP notifier; anything
/// less disables sending without failing startup.
pub fn from_config(config: &Config) -> Result<Arc<dyn Notifier>, AppError> {
    if config.smtp_partially_configured() {
        warn!("Incomplete SMTP credentials; contact notifications disabled");
    }

    match config.smtp() {
        Some(smtp) => {
            info!(host = %smtp.host, port = smtp.port, "SMTP relay configured");
            Ok(Arc::new(SmtpNotifier::new(&smtp)?))
        }
        None => {
            info!("SMTP credentials not configured; contact notifications disabled");
            Ok(Arc::new(NoopNotifier))
        }
    }
}
