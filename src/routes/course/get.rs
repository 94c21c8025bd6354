use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Published courses.")]
#[get("/published-courses")]
pub async fn published_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::course::fetch_published(pg_pool.get_ref())
        .await
        .map(|courses| JsonResponse::build().set_list(courses).ok("OK"))
        .map_err(|err| JsonResponse::<models::CourseWithCreator>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Search courses.")]
#[get("/search")]
pub async fn search_handler(
    query: web::Query<forms::course::SearchQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let search: models::CourseSearch = query.into_inner().into();
    db::course::search(pg_pool.get_ref(), &search)
        .await
        .map(|courses| JsonResponse::build().set_list(courses).ok("OK"))
        .map_err(|err| JsonResponse::<models::CourseWithCreator>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Creator courses.")]
#[get("")]
pub async fn creator_list_handler(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::course::fetch_by_creator(pg_pool.get_ref(), user.id)
        .await
        .map(|courses| JsonResponse::build().set_list(courses).ok("OK"))
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get course.")]
#[get("/{id}")]
pub async fn item_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.map(|user| user.into_inner());
    let course = guard::fetch_visible_course(pg_pool.get_ref(), path.0, user.as_deref()).await?;

    Ok(JsonResponse::build()
        .set_id(course.id)
        .set_item(course)
        .ok("OK"))
}
