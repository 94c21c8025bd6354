//! Certificate issuance: completion check, rendering and persistence.

use crate::configuration::CertificateSettings;
use crate::db;
use crate::models::{Certificate, CertificateDetails};
use crate::services::certificate_renderer::{self, CertificateContent, RenderError};
use sqlx::PgPool;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    #[error("Course is not completed yet")]
    NotCompleted,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Database(String),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Certificate rendering was interrupted")]
    Cancelled,
}

/// Renders off the async executor; PDF building and file IO are blocking.
pub async fn render(
    settings: &CertificateSettings,
    details: &CertificateDetails,
) -> Result<PathBuf, CertificateError> {
    let path = PathBuf::from(&details.certificate.file_path);
    let content = CertificateContent::new(&settings.issuer, details);
    let target = path.clone();

    tokio::task::spawn_blocking(move || certificate_renderer::render_to_file(&target, &content))
        .await
        .map_err(|err| {
            tracing::error!("Certificate render task failed: {:?}", err);
            CertificateError::Cancelled
        })??;

    Ok(path)
}

/// Returns the file path, re-rendering the PDF from the record when the file
/// has gone missing.
pub async fn ensure_file(
    settings: &CertificateSettings,
    details: &CertificateDetails,
) -> Result<PathBuf, CertificateError> {
    let path = Path::new(&details.certificate.file_path);
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    tracing::warn!(
        "Certificate file {} is missing, regenerating",
        details.certificate.file_path
    );
    render(settings, details).await
}

/// Issues the certificate for a completed course. Issuing twice returns the
/// first certificate.
#[tracing::instrument(name = "Issue certificate.", skip(pool, settings))]
pub async fn issue(
    pool: &PgPool,
    settings: &CertificateSettings,
    user_id: i32,
    course_id: i32,
) -> Result<CertificateDetails, CertificateError> {
    if let Some(existing) = db::certificate::fetch_by_user_and_course(pool, user_id, course_id)
        .await
        .map_err(CertificateError::Database)?
    {
        return Ok(existing);
    }

    let completed = db::progress::fetch(pool, user_id, course_id)
        .await
        .map_err(CertificateError::Database)?
        .map(|progress| progress.completed)
        .unwrap_or(false);
    if !completed {
        return Err(CertificateError::NotCompleted);
    }

    let user = db::user::fetch(pool, user_id)
        .await
        .map_err(CertificateError::Database)?
        .ok_or(CertificateError::NotFound("User"))?;
    let course = db::course::fetch(pool, course_id)
        .await
        .map_err(CertificateError::Database)?
        .ok_or(CertificateError::NotFound("Course"))?;

    let details = CertificateDetails {
        certificate: Certificate::new(user_id, course_id, Path::new(&settings.storage_dir)),
        recipient_name: user.name,
        course_title: course.title,
    };
    render(settings, &details).await?;

    match db::certificate::insert(pool, details.certificate.clone())
        .await
        .map_err(CertificateError::Database)?
    {
        Some(_) => Ok(details),
        None => {
            // a concurrent request stored its certificate first
            if let Err(err) = std::fs::remove_file(&details.certificate.file_path) {
                tracing::warn!("Could not remove orphaned certificate file: {:?}", err);
            }
            db::certificate::fetch_by_user_and_course(pool, user_id, course_id)
                .await
                .map_err(CertificateError::Database)?
                .ok_or(CertificateError::NotFound("Certificate"))
        }
    }
}

/// Summary of a bulk regeneration run.
#[derive(Debug, Default, PartialEq)]
pub struct RegenerateReport {
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Re-renders the given certificates. With `missing_only` existing files are
/// left alone.
pub async fn regenerate(
    settings: &CertificateSettings,
    certificates: &[CertificateDetails],
    missing_only: bool,
) -> RegenerateReport {
    let mut report = RegenerateReport::default();

    for details in certificates {
        if missing_only && Path::new(&details.certificate.file_path).is_file() {
            report.skipped += 1;
            continue;
        }

        match render(settings, details).await {
            Ok(path) => {
                tracing::info!("Regenerated {}", path.display());
                report.rendered += 1;
            }
            Err(err) => {
                tracing::error!(
                    "Failed to regenerate certificate {}: {}",
                    details.certificate.id,
                    err
                );
                report.failed += 1;
            }
        }
    }

    report
}
