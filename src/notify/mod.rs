//! Reminder delivery
//!
//! - PendingQueue: reminders whose last delivery failed, deduplicated by homework id
//! - MailTransport: sends one formatted message (SmtpMailer over lettre, ConsoleTransport for dry runs)
//! - format: subject and body rendering
//! - DeliveryCoordinator: drain, merge, send, re-queue on failure

pub mod coordinator;
pub mod format;
pub mod pending;
pub mod transport;

pub use coordinator::{DeliveryCoordinator, DeliveryOutcome, merge_reminders};
pub use format::{build_body, build_subject};
pub use pending::PendingQueue;
pub use transport::{ConsoleTransport, MailTransport, SmtpMailer};
