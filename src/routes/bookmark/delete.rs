use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Delete bookmark.")]
#[delete("/{course_id}")]
pub async fn delete_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let removed = db::bookmark::delete(pg_pool.get_ref(), user.id, path.0)
        .await
        .map_err(|err| JsonResponse::<models::Bookmark>::build().internal_server_error(err))?;

    if removed {
        Ok(JsonResponse::<models::Bookmark>::build().ok("Bookmark removed"))
    } else {
        Err(JsonResponse::<models::Bookmark>::build().not_found("Bookmark not found"))
    }
}

#[tracing::instrument(name = "Clear bookmarks.")]
#[delete("")]
pub async fn clear_handler(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::bookmark::clear(pg_pool.get_ref(), user.id)
        .await
        .map(|removed| {
            JsonResponse::<models::Bookmark>::build().ok(format!("Removed {} bookmarks", removed))
        })
        .map_err(|err| JsonResponse::<models::Bookmark>::build().internal_server_error(err))
}
