use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Delivery tag of a submission.
///
/// Stored records stay `New`; `sent` and `received` only describe what
/// happened to the notification email of the request that created them.
#[derive(
    Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    New,
    #[serde(rename = "sent")]
    #[strum(serialize = "sent")]
    Sent,
    #[serde(rename = "received")]
    #[strum(serialize = "received")]
    Received,
}

impl Status {
    /// Case-insensitive exact match against the serialized name.
    pub fn matches(&self, value: &str) -> bool {
        self.as_ref().eq_ignore_ascii_case(value.trim())
    }
}

pub const DEFAULT_INQUIRY_TYPE: &str = "General";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_source_casing() {
        assert_eq!(serde_json::to_string(&Status::New).unwrap(), "\"New\"");
        assert_eq!(serde_json::to_string(&Status::Sent).unwrap(), "\"sent\"");
        assert_eq!(Status::Received.to_string(), "received");
    }

    #[test]
    fn status_matches_ignores_case() {
        assert!(Status::New.matches("new"));
        assert!(Status::New.matches("NEW"));
        assert!(Status::Sent.matches("Sent"));
        assert!(!Status::New.matches("ne"));
        assert!(!Status::Received.matches("sent"));
    }
}
