use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::views;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Marks a lecture viewed; the course completes once every lecture is.
#[tracing::instrument(name = "View lecture.")]
#[post("/{course_id}/lecture/{lecture_id}/view")]
pub async fn view_lecture_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32, i32)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (course_id, lecture_id) = path.into_inner();
    let pool = pg_pool.get_ref();
    let internal = |err: String| JsonResponse::<views::progress::Progress>::build().internal_server_error(err);

    let course = guard::fetch_course(pool, course_id).await?;
    guard::require_content_access(pool, &course, &user).await?;

    db::lecture::fetch(pool, course.id, lecture_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| JsonResponse::<models::Lecture>::build().not_found("Lecture not found"))?;

    let progress = db::progress::fetch_or_create(pool, user.id, course.id)
        .await
        .map_err(internal)?;
    db::progress::set_lecture_viewed(pool, progress.id, lecture_id)
        .await
        .map_err(internal)?;

    let lecture_ids: Vec<i32> = db::lecture::fetch_by_course(pool, course.id)
        .await
        .map_err(internal)?
        .into_iter()
        .map(|lecture| lecture.id)
        .collect();
    let lecture_progress = db::progress::fetch_lectures(pool, progress.id)
        .await
        .map_err(internal)?;
    let completed = models::all_lectures_viewed(&lecture_ids, &lecture_progress);
    if completed != progress.completed {
        db::progress::set_completed(pool, progress.id, completed)
            .await
            .map_err(internal)?;
    }

    let report = super::report(pool, course, user.id).await?;
    Ok(JsonResponse::build().set_item(report).ok("Lecture viewed"))
}

#[tracing::instrument(name = "Mark course completed.")]
#[post("/{course_id}/complete")]
pub async fn complete_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    mark_all(&user, path.0, pg_pool.get_ref(), true)
        .await
        .map(|report| JsonResponse::build().set_item(report).ok("Course marked as completed"))
}

#[tracing::instrument(name = "Mark course incomplete.")]
#[post("/{course_id}/incomplete")]
pub async fn incomplete_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    mark_all(&user, path.0, pg_pool.get_ref(), false)
        .await
        .map(|report| JsonResponse::build().set_item(report).ok("Course marked as incomplete"))
}

async fn mark_all(
    user: &models::User,
    course_id: i32,
    pool: &PgPool,
    viewed: bool,
) -> Result<views::progress::Progress, actix_web::Error> {
    let course = guard::fetch_course(pool, course_id).await?;
    guard::require_content_access(pool, &course, user).await?;

    let progress = db::progress::fetch_or_create(pool, user.id, course.id)
        .await
        .map_err(|err| JsonResponse::<views::progress::Progress>::build().internal_server_error(err))?;
    db::progress::mark_all(pool, progress.id, course.id, viewed)
        .await
        .map_err(|err| JsonResponse::<views::progress::Progress>::build().internal_server_error(err))?;

    super::report(pool, course, user.id).await
}
