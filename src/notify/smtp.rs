//! SMTP delivery of contact notifications.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, instrument};

use crate::config::SmtpConfig;
use crate::error::NotifyError;
use crate::store::ContactMessage;

use super::Notifier;

/// Upper bound on a single SMTP exchange so a slow relay cannot hold a
/// request open indefinitely.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Notifier that relays contact submissions through an SMTP server.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier from complete SMTP settings.
    ///
    /// The connection itself is deferred; the transport dials and
    /// authenticates on first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(config.user.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            sender: config.user.parse()?,
            recipient: config.recipient.parse()?,
        })
    }

    fn compose(&self, message: &ContactMessage) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(format!("Portfolio Contact: Message from {}", message.name));

        // The submitter's address is opaque to the API layer; if it does not
        // parse as a mailbox the reply-to header is simply omitted.
        if let Ok(reply_to) = message.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        let email = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_PLAIN)
                        .body(render_text(message)),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_HTML)
                        .body(render_html(message)),
                ),
        )?;

        Ok(email)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[instrument(skip(self, message), fields(id = %message.id))]
    async fn contact_submitted(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        let email = self.compose(message)?;
        self.transport.send(email).await?;
        debug!("contact notification sent");
        Ok(())
    }
}

fn field_or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        "Not provided"
    } else {
        value
    }
}

/// Plain-text rendering of a contact submission.
fn render_text(message: &ContactMessage) -> String {
    format!(
        "New Portfolio Contact Message\n\
         ============================\n\
         \n\
         From: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Location: {address}\n\
         \n\
         Message:\n\
         {comment}\n\
         \n\
         ---\n\
         Sent from your portfolio website at {timestamp}\n",
        name = message.name,
        email = message.email,
        phone = field_or_placeholder(&message.phone),
        address = field_or_placeholder(&message.address),
        comment = message.comment,
        timestamp = message.timestamp.to_rfc3339(),
    )
}

/// HTML rendering of a contact submission.
fn render_html(message: &ContactMessage) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h2>New Portfolio Contact Message</h2>\
           <p><strong>From:</strong> {name}</p>\
           <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
           <p><strong>Phone:</strong> {phone}</p>\
           <p><strong>Location:</strong> {address}</p>\
           <p><strong>Message:</strong></p>\
           <p style=\"white-space: pre-wrap;\">{comment}</p>\
           <p style=\"font-size: 12px; color: #666;\">\
             Sent from your portfolio website at {timestamp}\
           </p>\
         </div>",
        name = escape_html(&message.name),
        email = escape_html(&message.email),
        phone = escape_html(field_or_placeholder(&message.phone)),
        address = escape_html(field_or_placeholder(&message.address)),
        comment = escape_html(&message.comment),
        timestamp = message.timestamp.to_rfc3339(),
    )
}

/// Escape the characters HTML treats as markup.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactForm;

    fn sample_message() -> ContactMessage {
        ContactMessage::from_form(ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.net".to_string(),
            phone: String::new(),
            address: "London".to_string(),
            comment: "Hello <world>".to_string(),
        })
    }

    #[test]
    fn text_rendering_includes_all_fields() {
        let message = sample_message();
        let body = render_text(&message);

        assert!(body.contains("From: Ada"));
        assert!(body.contains("Email: ada@example.net"));
        assert!(body.contains("Phone: Not provided"));
        assert!(body.contains("Location: London"));
        assert!(body.contains("Hello <world>"));
    }

    #[test]
    fn html_rendering_escapes_markup() {
        let message = sample_message();
        let body = render_html(&message);

        assert!(body.contains("Hello &lt;world&gt;"));
        assert!(!body.contains("Hello <world>"));
    }

    #[tokio::test]
    async fn compose_builds_multipart_message() {
        let config = SmtpConfig {
            host: "smtp.example.net".to_string(),
            port: 587,
            user: "mailer@example.net".to_string(),
            password: "hunter2".to_string(),
            recipient: "owner@example.net".to_string(),
        };

        let notifier = SmtpNotifier::new(&config).unwrap();
        let email = notifier.compose(&sample_message()).unwrap();

        let rendered = String::from_utf8(email.formatted()).unwrap();
        assert!(rendered.contains("Subject: Portfolio Contact: Message from Ada"));
        assert!(rendered.contains("To: owner@example.net"));
        assert!(rendered.contains("Reply-To: ada@example.net"));
    }

    #[tokio::test]
    async fn compose_tolerates_unparseable_submitter_address() {
        let config = SmtpConfig {
            host: "smtp.example.net".to_string(),
            port: 587,
            user: "mailer@example.net".to_string(),
            password: "hunter2".to_string(),
            recipient: "owner@example.net".to_string(),
        };

        let notifier = SmtpNotifier::new(&config).unwrap();
        let mut message = sample_message();
        message.email = "not an address".to_string();

        let email = notifier.compose(&message).unwrap();
        let rendered = String::from_utf8(email.formatted()).unwrap();
        assert!(!rendered.contains("Reply-To:"));
    }
}
