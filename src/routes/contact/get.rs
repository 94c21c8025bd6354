use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Mounted under the admin scope.
#[tracing::instrument(name = "Admin list contact messages.")]
#[get("/contact")]
pub async fn admin_list_handler(
    _admin: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::contact::fetch_all(pg_pool.get_ref())
        .await
        .map(|messages| JsonResponse::build().set_list(messages).ok("OK"))
        .map_err(|err| JsonResponse::<models::ContactMessage>::build().internal_server_error(err))
}
