use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "List own purchases.")]
#[get("")]
pub async fn list_handler(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::purchase::fetch_by_user(pg_pool.get_ref(), user.id)
        .await
        .map(|purchases| JsonResponse::build().set_list(purchases).ok("OK"))
        .map_err(|err| JsonResponse::<models::PurchaseWithCourse>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Course detail with purchase status.")]
#[get("/course/{course_id}/detail-with-status")]
pub async fn detail_with_status_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = guard::fetch_visible_course(pg_pool.get_ref(), path.0, Some(&**user)).await?;
    let purchased = guard::is_enrolled(pg_pool.get_ref(), user.id, course.id).await?;
    let has_access = purchased || guard::can_manage(&course, &user);

    let lectures = db::lecture::fetch_by_course(pg_pool.get_ref(), course.id)
        .await
        .map_err(|err| JsonResponse::<views::course::CourseDetail>::build().internal_server_error(err))?;

    Ok(JsonResponse::build()
        .set_id(course.id)
        .set_item(views::course::CourseDetail::new(course, lectures, purchased, has_access))
        .ok("OK"))
}

#[tracing::instrument(name = "Admin list purchases.")]
#[get("/purchase")]
pub async fn admin_list_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::purchase::fetch_all(pg_pool.get_ref())
        .await
        .map(|purchases| JsonResponse::build().set_list(purchases).ok("OK"))
        .map_err(|err| JsonResponse::<models::PurchaseWithCourse>::build().internal_server_error(err))
}
