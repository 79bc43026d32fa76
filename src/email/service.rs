//! Email notification service

use crate::config::EmailConfig;
use anyhow::{Context, anyhow};
use carelead_contact::ContactSubmission;
use lettre::{
    Message, SmtpTransport, Transport as _,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{info, warn};

use super::{ContactNotification, ResendClient};

#[derive(Clone)]
enum Transport {
    Disabled,
    Resend(ResendClient),
    Smtp(SmtpTransport),
    Mock,
}

/// Email service for contact notifications
#[derive(Clone)]
pub struct EmailService {
    transport: Transport,
    from: String,
    contact_address: Option<String>,
}

impl EmailService {
    /// Create a new email service from configuration
    ///
    /// A Resend API key wins over SMTP settings; with neither the service is
    /// disabled and every submission is reported as `received`.
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let resend_key = config
            .resend_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());

        let transport = match (resend_key, config.smtp_host.as_deref()) {
            (Some(api_key), _) => {
                info!(
                    contact_address = ?config.contact_address,
                    "Email service initialized with Resend"
                );
                match &config.resend_api_url {
                    Some(endpoint) => {
                        Transport::Resend(ResendClient::with_endpoint(api_key, endpoint))
                    }
                    None => Transport::Resend(ResendClient::new(api_key)),
                }
            }
            (None, Some(smtp_host)) if !smtp_host.trim().is_empty() => {
                let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
                    info!(
                        smtp_host = %smtp_host,
                        smtp_port = config.smtp_port,
                        "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
                    );
                    SmtpTransport::builder_dangerous(smtp_host)
                        .port(config.smtp_port)
                        .build()
                } else {
                    info!(
                        smtp_host = %smtp_host,
                        smtp_port = config.smtp_port,
                        "Email service initialized with SMTP authentication and TLS"
                    );
                    let creds =
                        Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
                    SmtpTransport::relay(smtp_host)?
                        .port(config.smtp_port)
                        .credentials(creds)
                        .build()
                };
                Transport::Smtp(mailer)
            }
            _ => {
                info!("No email transport configured, contact notifications disabled");
                Transport::Disabled
            }
        };

        Ok(Self {
            transport,
            from: config.from_address.clone(),
            contact_address: config.contact_address.clone(),
        })
    }

    /// Create a mock email service for testing (skips actual delivery)
    pub fn new_mock(config: &EmailConfig) -> Self {
        info!("Mock email service initialized (delivery skipped)");

        Self {
            transport: Transport::Mock,
            from: config.from_address.clone(),
            contact_address: config.contact_address.clone(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            transport: Transport::Disabled,
            from: String::new(),
            contact_address: None,
        }
    }

    /// Whether a delivery credential is configured
    pub fn is_enabled(&self) -> bool {
        !matches!(self.transport, Transport::Disabled)
    }

    /// Send the notification for a freshly recorded submission
    pub async fn send_contact_notification(
        &self,
        submission: &ContactSubmission,
    ) -> anyhow::Result<()> {
        let notification = match &self.transport {
            Transport::Disabled => return Err(anyhow!("email delivery is not configured")),
            _ => ContactNotification::render(submission)?,
        };

        let to = self
            .contact_address
            .as_deref()
            .ok_or_else(|| anyhow!("no contact address configured"))?;

        match &self.transport {
            Transport::Disabled => {}
            Transport::Mock => {
                info!(
                    contact_number = %submission.contact_number,
                    "Mock email service: skipping actual delivery"
                );
            }
            Transport::Resend(client) => {
                let id = client.send(&self.from, to, &notification).await?;
                info!(
                    contact_number = %submission.contact_number,
                    resend_id = %id,
                    "Contact notification sent via Resend"
                );
            }
            Transport::Smtp(mailer) => {
                let email = build_message(&self.from, to, &notification)?;
                let mailer = mailer.clone();

                tokio::task::spawn_blocking(move || mailer.send(&email))
                    .await
                    .context("SMTP task panicked")?
                    .context("SMTP delivery failed")?;

                info!(
                    contact_number = %submission.contact_number,
                    "Contact notification sent via SMTP"
                );
            }
        }

        Ok(())
    }
}

fn build_message(
    from: &str,
    to: &str,
    notification: &ContactNotification,
) -> anyhow::Result<Message> {
    let from_mailbox: Mailbox = from.parse().context("Failed to parse from email")?;
    let to_mailbox: Mailbox = to.parse().context("Failed to parse to email")?;

    let mut builder = Message::builder()
        .from(from_mailbox)
        .to(to_mailbox)
        .subject(notification.subject.as_str());

    match notification.reply_to.parse::<Mailbox>() {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(e) => warn!(error = %e, "Submitter email is not a valid reply-to address"),
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(notification.text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(notification.html.clone()),
                ),
        )
        .context("Failed to build email message")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> ContactNotification {
        ContactNotification {
            subject: "New contact submission CN-20240101-1234: Hello".to_string(),
            html: "<p>Hello</p>".to_string(),
            text: "Hello".to_string(),
            reply_to: "not an address".to_string(),
        }
    }

    #[test]
    fn test_disabled_without_credentials() {
        let service = EmailService::new(&EmailConfig::default()).unwrap();
        assert!(!service.is_enabled());
    }

    #[test]
    fn test_resend_wins_over_smtp() {
        let config = EmailConfig {
            resend_api_key: Some("re_test".to_string()),
            smtp_host: Some("localhost".to_string()),
            ..EmailConfig::default()
        };
        let service = EmailService::new(&config).unwrap();

        assert!(service.is_enabled());
        assert!(matches!(service.transport, Transport::Resend(_)));
    }

    #[test]
    fn test_blank_resend_key_is_ignored() {
        let config = EmailConfig {
            resend_api_key: Some("  ".to_string()),
            ..EmailConfig::default()
        };

        assert!(!EmailService::new(&config).unwrap().is_enabled());
    }

    #[test]
    fn test_build_message_tolerates_bad_reply_to() {
        let message = build_message(
            "Contact Form <noreply@carelead.localhost>",
            "office@carelead.localhost",
            &notification(),
        );
        assert!(message.is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let message = build_message("noreply@carelead.localhost", "office", &notification());
        assert!(message.is_err());
    }
}
