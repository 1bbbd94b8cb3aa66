//! No-op and recording notifiers.
//!
//! `NoopNotifier` backs deployments without SMTP credentials; the recording
//! variant lets tests observe (or fail) notification attempts without any
//! outbound connection.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::error::NotifyError;
use crate::store::ContactMessage;

use super::Notifier;

/// Notifier that skips sending entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn contact_submitted(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        debug!(id = %message.id, "mail relay not configured; skipping notification");
        Ok(())
    }
}

/// Notifier that records every attempt for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    /// Whether attempts should fail after being recorded.
    fail_sends: bool,
    sent: Arc<Mutex<Vec<ContactMessage>>>,
}

impl RecordingNotifier {
    /// Create a recording notifier whose sends succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording notifier whose sends fail.
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Messages passed to [`Notifier::contact_submitted`] so far.
    pub fn sent(&self) -> Vec<ContactMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn contact_submitted(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail_sends {
            return Err(NotifyError::DeliveryFailed("injected failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactForm;

    fn sample_message() -> ContactMessage {
        ContactMessage::from_form(ContactForm {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            phone: String::new(),
            address: String::new(),
            comment: "hi".to_string(),
        })
    }

    #[tokio::test]
    async fn recording_notifier_captures_messages() {
        let notifier = RecordingNotifier::new();
        let message = sample_message();

        notifier.contact_submitted(&message).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id, message.id);
    }

    #[tokio::test]
    async fn failing_notifier_records_then_errors() {
        let notifier = RecordingNotifier::failing();

        let result = notifier.contact_submitted(&sample_message()).await;
        assert!(result.is_err());
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn noop_notifier_always_succeeds() {
        assert!(NoopNotifier.contact_submitted(&sample_message()).await.is_ok());
    }
}
