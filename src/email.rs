mod resend;
mod service;

pub use resend::*;
pub use service::*;

use anyhow::{Context, Result};
use askama::Template;
use carelead_contact::ContactSubmission;

/// Contact notification email HTML template
#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct ContactNotificationHtmlTemplate<'a> {
    submission: &'a ContactSubmission,
}

/// Contact notification email plain text template
#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct ContactNotificationTextTemplate<'a> {
    submission: &'a ContactSubmission,
}

/// Rendered notification, independent of the transport that delivers it
#[derive(Debug, Clone)]
pub struct ContactNotification {
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: String,
}

impl ContactNotification {
    pub fn render(submission: &ContactSubmission) -> Result<Self> {
        let html = ContactNotificationHtmlTemplate { submission }
            .render()
            .context("Failed to render HTML email template")?;

        let text = ContactNotificationTextTemplate { submission }
            .render()
            .context("Failed to render plain text email template")?;

        Ok(Self {
            subject: format!(
                "New contact submission {}: {}",
                submission.contact_number, submission.subject
            ),
            html,
            text,
            reply_to: submission.email.to_owned(),
        })
    }
}
