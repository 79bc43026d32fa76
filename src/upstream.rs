//! Client for the external API the list endpoint proxies to

use std::time::Duration;

use carelead_contact::ListQuery;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::config::UpstreamConfig;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
pub const PAGE_HEADER: &str = "x-page";
pub const PAGE_SIZE_HEADER: &str = "x-page-size";

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream API is not configured")]
    NotConfigured,

    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream API returned {0}")]
    Status(reqwest::StatusCode),
}

/// A page as answered by the upstream API, body forwarded untouched
#[derive(Debug, Clone)]
pub struct UpstreamPage {
    pub body: serde_json::Value,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .api_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty());

        Ok(Self { client, base_url })
    }

    /// Client that always reports `NotConfigured`
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub async fn list_contacts(&self, query: &ListQuery) -> Result<UpstreamPage, UpstreamError> {
        let base_url = self.base_url.as_deref().ok_or(UpstreamError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{base_url}/contact"))
            .query(&query.to_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let headers = response.headers().clone();
        let body: serde_json::Value = response.json().await?;

        let item_count = body.as_array().map(Vec::len).unwrap_or_default();

        Ok(UpstreamPage {
            total: header_usize(&headers, TOTAL_COUNT_HEADER).unwrap_or(item_count),
            page: header_usize(&headers, PAGE_HEADER).unwrap_or(query.page),
            page_size: header_usize(&headers, PAGE_SIZE_HEADER).unwrap_or(query.page_size),
            body,
        })
    }
}

fn header_usize(headers: &HeaderMap, name: &str) -> Option<usize> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
