use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Certificate {
    pub id: Uuid,
    pub user_id: i32,
    pub course_id: i32,
    #[serde(skip_serializing)]
    pub file_path: String,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    pub fn new(user_id: i32, course_id: i32, storage_dir: &Path) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            user_id,
            course_id,
            file_path: Self::path_for(storage_dir, id).to_string_lossy().into_owned(),
            issued_at: Utc::now(),
        }
    }

    /// `<storage_dir>/<id>.pdf`
    pub fn path_for(storage_dir: &Path, id: Uuid) -> PathBuf {
        storage_dir.join(format!("{}.pdf", id))
    }

    pub fn download_name(&self) -> String {
        format!("certificate-{}.pdf", self.id)
    }
}

/// Certificate joined with the names printed on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct CertificateDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub certificate: Certificate,
    pub recipient_name: String,
    pub course_title: String,
}
