use crate::models;
use crate::helpers::JsonResponse;
use crate::routes::guard;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Get course progress.")]
#[get("/{course_id}")]
pub async fn item_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = guard::fetch_course(pg_pool.get_ref(), path.0).await?;
    guard::require_content_access(pg_pool.get_ref(), &course, &user).await?;

    let report = super::report(pg_pool.get_ref(), course, user.id).await?;
    Ok(JsonResponse::build().set_item(report).ok("OK"))
}
