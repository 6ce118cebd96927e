use anyhow::Result;
use reqwest::Client;
use serde::Serialize;

const SENDGRID_API: &str = "https://api.sendgrid.com/v3/mail/send";

/// A fully composed message ready for delivery.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
}

#[derive(Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

pub struct SendGridClient {
    client: Client,
    api_key: String,
}

impl SendGridClient {
    pub fn new(api_key: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .user_agent("Folio/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build SendGrid HTTP client: {e}"))?;

        Ok(Self { client, api_key })
    }

    /// Reuse an already-built HTTP client to share its connection pool.
    #[must_use]
    pub const fn with_shared_client(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let body = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress { email: &email.to }],
            }],
            from: EmailAddress { email: &email.from },
            subject: &email.subject,
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: &email.text,
                },
                Content {
                    content_type: "text/html",
                    value: &email.html,
                },
            ],
        };

        let response = self
            .client
            .post(SENDGRID_API)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("SendGrid returned {status}: {detail}");
        }

        Ok(())
    }
}
