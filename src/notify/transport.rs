//! Mail transport.
//!
//! `MailTransport` is the seam the coordinator delivers through. `SmtpMailer`
//! sends over lettre's async SMTP transport; `ConsoleTransport` prints the
//! message instead, for dry runs.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpConfig, SmtpSecurity};
use crate::error::{DeliveryError, NotifyError, Result};

/// Delivers one message to a set of recipients
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, recipients: &[String], subject: &str, body: &str) -> std::result::Result<(), DeliveryError>;
}

/// SMTP transport backed by lettre
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| NotifyError::Config(format!("Invalid smtp.from '{}': {}", config.from, e)))?;

        let builder = match config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host),
            SmtpSecurity::None => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)),
        }
        .map_err(|e| NotifyError::Config(format!("Invalid SMTP host '{}': {}", config.host, e)))?;

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(config.username.clone(), config.password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Assemble a plain-text message addressed to every recipient
pub fn build_message(from: &Mailbox, recipients: &[String], subject: &str, body: &str) -> std::result::Result<Message, DeliveryError> {
    let mut builder = Message::builder().from(from.clone()).subject(subject).header(ContentType::TEXT_PLAIN);
    for recipient in recipients {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| DeliveryError::Address(format!("{}: {}", recipient, e)))?;
        builder = builder.to(to);
    }
    builder
        .body(body.to_string())
        .map_err(|e| DeliveryError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, recipients: &[String], subject: &str, body: &str) -> std::result::Result<(), DeliveryError> {
        let message = build_message(&self.from, recipients, subject, body)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Prints messages to stdout instead of sending them
#[derive(Debug, Default)]
pub struct ConsoleTransport;

/// Render a message the way `ConsoleTransport` prints it
pub fn render_message(recipients: &[String], subject: &str, body: &str) -> String {
    format!("To: {}\nSubject: {}\n\n{}", recipients.join(", "), subject, body)
}

#[async_trait]
impl MailTransport for ConsoleTransport {
    async fn deliver(&self, recipients: &[String], subject: &str, body: &str) -> std::result::Result<(), DeliveryError> {
        println!("{}", render_message(recipients, subject, body));
        Ok(())
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").field("from", &self.from.to_string()).finish()
    }
}
