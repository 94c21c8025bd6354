use crate::configuration::Settings;
use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services;
use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, web, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Download certificate.", skip(settings))]
#[get("/{id}/download")]
pub async fn download_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<NamedFile> {
    let details = db::certificate::fetch(pg_pool.get_ref(), path.0)
        .await
        .map_err(|err| JsonResponse::<models::CertificateDetails>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::CertificateDetails>::build().not_found("Certificate not found"))?;

    if details.certificate.user_id != user.id && !user.is_admin() {
        return Err(JsonResponse::<models::CertificateDetails>::build()
            .forbidden("Certificate belongs to another user"));
    }

    let file_path = services::certificate::ensure_file(&settings.certificates, &details)
        .await
        .map_err(super::certificate_error)?;

    let file = NamedFile::open_async(&file_path).await.map_err(|err| {
        tracing::error!("Failed to open certificate file {}: {:?}", file_path.display(), err);
        JsonResponse::<models::CertificateDetails>::build().internal_server_error("Could not read certificate")
    })?;

    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(details.certificate.download_name())],
    }))
}
