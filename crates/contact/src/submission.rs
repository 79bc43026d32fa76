use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use validator::Validate;

use crate::{DEFAULT_INQUIRY_TYPE, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub contact_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub subject: String,
    pub message: String,
    #[serde(default = "default_inquiry_type")]
    pub inquiry_type: String,
    #[serde(default)]
    pub status: Status,
    pub created_date: DateTime<Utc>,
}

fn default_inquiry_type() -> String {
    DEFAULT_INQUIRY_TYPE.to_owned()
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Copy of the record carrying the delivery tag of its creating request.
    pub fn tagged(&self, status: Status) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Raw form payload. Every field is optional at the wire level so that a
/// missing key is reported the same way as a blank one.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub inquiry_type: Option<String>,
}

#[derive(Debug, Validate)]
struct ContactDraft {
    #[validate(length(min = 1))]
    first_name: String,
    #[validate(length(min = 1))]
    last_name: String,
    #[validate(length(min = 1))]
    email: String,
    #[validate(length(min = 1))]
    subject: String,
    #[validate(length(min = 1))]
    message: String,
    phone_number: String,
    inquiry_type: String,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_owned()).unwrap_or_default()
}

impl SubmitContactInput {
    /// Validates the payload and builds a new `New` record stamped with `now`.
    pub fn into_submission(self, now: DateTime<Utc>) -> crate::Result<ContactSubmission> {
        let draft = ContactDraft {
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            email: trimmed(self.email),
            subject: trimmed(self.subject),
            message: trimmed(self.message),
            phone_number: trimmed(self.phone_number),
            inquiry_type: trimmed(self.inquiry_type),
        };

        draft.validate()?;

        let inquiry_type = if draft.inquiry_type.is_empty() {
            default_inquiry_type()
        } else {
            draft.inquiry_type
        };

        Ok(ContactSubmission {
            id: Ulid::new().to_string().to_lowercase(),
            contact_number: generate_contact_number(now),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone_number: draft.phone_number,
            subject: draft.subject,
            message: draft.message,
            inquiry_type,
            status: Status::New,
            created_date: now,
        })
    }
}

/// `CN-YYYYMMDD-RRRR`, the suffix always four digits.
pub fn generate_contact_number(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);

    format!("CN-{}-{suffix}", now.format("%Y%m%d"))
}
