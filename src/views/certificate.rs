use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Public answer to "is this certificate genuine?"
#[derive(Debug, Serialize)]
pub struct Verification {
    pub id: Uuid,
    pub valid: bool,
    pub recipient_name: String,
    pub course_title: String,
    pub issued_at: DateTime<Utc>,
}

impl From<models::CertificateDetails> for Verification {
    fn from(details: models::CertificateDetails) -> Self {
        Self {
            id: details.certificate.id,
            valid: true,
            recipient_name: details.recipient_name,
            course_title: details.course_title,
            issued_at: details.certificate.issued_at,
        }
    }
}
