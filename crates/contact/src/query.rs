use serde::{Deserialize, Serialize};

use crate::ContactSubmission;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Raw query string of the list endpoint. Values stay strings so that an
/// empty or malformed parameter falls back to its default instead of
/// rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub page_size: usize,
    pub status: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            status: None,
        }
    }
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        let parse = |value: Option<String>| value.and_then(|v| v.trim().parse::<usize>().ok());

        Self {
            page: parse(params.page).unwrap_or(1).max(1),
            page_size: parse(params.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            status: params
                .status
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<ContactSubmission>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(page: usize, page_size: usize, status: Option<String>) -> Self {
        ListParams {
            page: Some(page.to_string()),
            page_size: Some(page_size.to_string()),
            status,
        }
        .into()
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Filters by status, then pages. Stored order is preserved.
    pub fn apply(&self, items: Vec<ContactSubmission>) -> Page {
        let filtered = match &self.status {
            Some(status) => items
                .into_iter()
                .filter(|s| s.status.matches(status))
                .collect::<Vec<_>>(),
            None => items,
        };

        let total = filtered.len();
        let items = filtered
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect();

        Page {
            items,
            total,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Query string pairs in the wire naming used by the list endpoint.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(status) = &self.status {
            pairs.push(("status", status.to_owned()));
        }
        pairs
    }
}
