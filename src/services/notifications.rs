//! Best-effort email notifications to the site owner.
//!
//! Every method returns whether the email actually went out; callers must
//! not fail the request on a `false` — the write has already been
//! persisted, and the notification is a side-effect.

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::sendgrid::{OutboundEmail, SendGridClient};
use crate::config::EmailConfig;

pub struct NotificationService {
    mailer: Option<Arc<SendGridClient>>,
    admin_email: String,
    from_address: String,
}

impl NotificationService {
    #[must_use]
    pub fn new(config: &EmailConfig, mailer: Option<Arc<SendGridClient>>) -> Self {
        Self {
            mailer,
            admin_email: config.admin_email.clone(),
            from_address: config.from_address.clone(),
        }
    }

    /// Notify the owner that a contact-form message arrived.
    pub async fn contact_message(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> bool {
        let text = format!(
            "Name: {name}\nEmail: {email}\nSubject: {subject}\n\nMessage:\n{message}"
        );

        let html = format!(
            "<h2>New Contact Form Submission</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Subject:</strong> {}</p>\
             <h3>Message:</h3>\
             <p>{}</p>",
            html_escape::encode_text(name),
            html_escape::encode_text(email),
            html_escape::encode_text(subject),
            html_escape::encode_text(message).replace('\n', "<br>"),
        );

        self.send(&format!("New Contact Form Submission: {subject}"), text, html)
            .await
    }

    /// Notify the owner that a case study was published.
    pub async fn case_study_published(&self, title: &str, slug: &str, client_name: &str) -> bool {
        let text = format!(
            "A new case study has been added to your portfolio:\n\n\
             Title: {title}\nClient: {client_name}\nURL: /case-studies/{slug}"
        );

        let html = format!(
            "<h2>New Case Study Added</h2>\
             <p>A new case study has been added to your portfolio:</p>\
             <p><strong>Title:</strong> {}</p>\
             <p><strong>Client:</strong> {}</p>\
             <p><strong>URL:</strong> <a href=\"/case-studies/{}\">/case-studies/{}</a></p>",
            html_escape::encode_text(title),
            html_escape::encode_text(client_name),
            html_escape::encode_text(slug),
            html_escape::encode_text(slug),
        );

        self.send(&format!("New Case Study Added: {title}"), text, html)
            .await
    }

    async fn send(&self, subject: &str, text: String, html: String) -> bool {
        let Some(mailer) = &self.mailer else {
            info!("Email notifications disabled; skipping \"{subject}\"");
            return false;
        };

        let email = OutboundEmail {
            to: self.admin_email.clone(),
            from: self.from_address.clone(),
            subject: subject.to_string(),
            text,
            html,
        };

        match mailer.send(&email).await {
            Ok(()) => {
                info!("Notification email sent to {}", self.admin_email);
                true
            }
            Err(e) => {
                warn!("Failed to send notification email: {e}");
                false
            }
        }
    }
}
