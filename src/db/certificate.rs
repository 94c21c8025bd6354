use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

const DETAILS: &str = r#"
    SELECT cert.*, u.name AS recipient_name, c.title AS course_title
    FROM certificate cert
    INNER JOIN users u ON u.id = cert.user_id
    INNER JOIN course c ON c.id = cert.course_id
"#;

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::CertificateDetails>, String> {
    tracing::info!("Fetch certificate {}", id);
    sqlx::query_as::<_, models::CertificateDetails>(&format!("{} WHERE cert.id=$1 LIMIT 1", DETAILS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch certificate, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_user_and_course(
    pool: &PgPool,
    user_id: i32,
    course_id: i32,
) -> Result<Option<models::CertificateDetails>, String> {
    let query_span = tracing::info_span!("Fetch certificate by user and course.");
    sqlx::query_as::<_, models::CertificateDetails>(&format!(
        "{} WHERE cert.user_id=$1 AND cert.course_id=$2 LIMIT 1",
        DETAILS
    ))
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch certificate, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<models::CertificateDetails>, String> {
    let query_span = tracing::info_span!("Fetch certificates by user.");
    sqlx::query_as::<_, models::CertificateDetails>(&format!(
        "{} WHERE cert.user_id=$1 ORDER BY cert.issued_at DESC",
        DETAILS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch certificates, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::CertificateDetails>, String> {
    let query_span = tracing::info_span!("Fetch all certificates.");
    sqlx::query_as::<_, models::CertificateDetails>(&format!("{} ORDER BY cert.issued_at", DETAILS))
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch certificates, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Inserts the certificate unless one already exists for the (user, course) pair.
/// Returns `None` when another request won the race.
pub async fn insert(
    pool: &PgPool,
    certificate: models::Certificate,
) -> Result<Option<models::Certificate>, String> {
    let query_span = tracing::info_span!("Saving new certificate into the database");
    sqlx::query_as::<_, models::Certificate>(
        r#"
        INSERT INTO certificate (id, user_id, course_id, file_path, issued_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, course_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(certificate.id)
    .bind(certificate.user_id)
    .bind(certificate.course_id)
    .bind(&certificate.file_path)
    .bind(certificate.issued_at)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}
