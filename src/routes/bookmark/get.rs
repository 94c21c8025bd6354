use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "List bookmarks.")]
#[get("")]
pub async fn list_handler(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::bookmark::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map(|bookmarks| JsonResponse::build().set_list(bookmarks).ok("OK"))
        .map_err(|err| JsonResponse::<models::BookmarkEntry>::build().internal_server_error(err))
}
