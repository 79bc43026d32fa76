//! Minimal client for the Resend transactional email API

use anyhow::{Context, Result, bail};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::ContactNotification;

pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, RESEND_API_URL)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .context("Invalid Resend API key")?,
        );
        Ok(headers)
    }

    /// Sends `notification`, returning the provider's message id.
    pub async fn send(
        &self,
        from: &str,
        to: &str,
        notification: &ContactNotification,
    ) -> Result<String> {
        let request = ResendRequest {
            from,
            to: vec![to],
            subject: &notification.subject,
            html: &notification.html,
            text: &notification.text,
            reply_to: Some(notification.reply_to.as_str()).filter(|r| r.contains('@')),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await
            .context("Failed to reach Resend API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Resend API returned {status}: {body}");
        }

        let body: ResendResponse = response
            .json()
            .await
            .context("Failed to parse Resend API response")?;

        Ok(body.id)
    }
}
