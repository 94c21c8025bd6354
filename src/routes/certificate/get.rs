use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "List own certificates.")]
#[get("")]
pub async fn list_handler(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::certificate::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map(|certificates| JsonResponse::build().set_list(certificates).ok("OK"))
        .map_err(|err| JsonResponse::<models::CertificateDetails>::build().internal_server_error(err))
}

/// Public lookup used by whoever is shown a certificate id.
#[tracing::instrument(name = "Verify certificate.")]
#[get("/verify/{id}")]
pub async fn verify_handler(
    path: web::Path<(Uuid,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::certificate::fetch(pg_pool.get_ref(), path.0)
        .await
        .map_err(|err| JsonResponse::<views::certificate::Verification>::build().internal_server_error(err))?
        .map(|details| {
            JsonResponse::build()
                .set_item(views::certificate::Verification::from(details))
                .ok("Certificate is valid")
        })
        .ok_or_else(|| {
            JsonResponse::<views::certificate::Verification>::build().not_found("Certificate not found")
        })
}
