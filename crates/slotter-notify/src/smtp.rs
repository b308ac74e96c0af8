//! SMTP dispatcher built on lettre's async Tokio transport.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use slotter_core::error::{SlotterError, SlotterResult};
use slotter_core::models::{slot::Slot, tenant::Tenant};
use slotter_core::notify::NotificationDispatcher;
use tracing::debug;

use crate::config::SmtpConfig;
use crate::templates::{self, RenderedMail};

/// Mail dispatcher.
///
/// `Disabled` is used when no SMTP configuration is present; it logs
/// each suppressed mail and succeeds, so the booking flow behaves the
/// same with and without a mail relay.
#[derive(Clone)]
pub enum Notifier {
    Smtp(SmtpNotifier),
    Disabled,
}

impl Notifier {
    /// Build an SMTP-backed notifier (STARTTLS on the submission port).
    pub fn smtp(config: &SmtpConfig) -> SlotterResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| SlotterError::Notification(format!("SMTP relay setup: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| SlotterError::Notification(format!("bad from address: {e}")))?;

        Ok(Self::Smtp(SmtpNotifier { transport, from }))
    }

    pub fn disabled() -> Self {
        Self::Disabled
    }

    async fn send(&self, to: &str, mail: RenderedMail) -> SlotterResult<()> {
        match self {
            Self::Smtp(smtp) => smtp.send(to, mail).await,
            Self::Disabled => {
                debug!(%to, subject = %mail.subject, "Mail suppressed, SMTP not configured");
                Ok(())
            }
        }
    }
}

#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    async fn send(&self, to: &str, mail: RenderedMail) -> SlotterResult<()> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| SlotterError::Notification(format!("bad recipient: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html)
            .map_err(|e| SlotterError::Notification(format!("message build: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| SlotterError::Notification(format!("SMTP send: {e}")))?;

        Ok(())
    }
}

impl NotificationDispatcher for Notifier {
    async fn send_client_confirmation(&self, slot: &Slot, tenant: &Tenant) -> SlotterResult<()> {
        let to = slot
            .client_email
            .as_deref()
            .ok_or_else(|| SlotterError::Notification("slot has no client email".into()))?;
        self.send(to, templates::booking_confirmation(slot, tenant))
            .await
    }

    async fn send_owner_alert(&self, slot: &Slot, tenant: &Tenant) -> SlotterResult<()> {
        self.send(&tenant.email, templates::owner_alert(slot, tenant))
            .await
    }
}
