use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::views;
use actix_web::{delete, get, post, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add lecture.")]
#[post("/{id}/lecture")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    form: web::Json<forms::lecture::Lecture>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner().trimmed();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Lecture>::build().form_error(errors.to_string()));
    }

    let course = guard::fetch_managed_course(pg_pool.get_ref(), path.0, &user).await?;
    let lecture = form.into_model(course.id);

    db::lecture::insert(pg_pool.get_ref(), lecture)
        .await
        .map(|lecture| {
            JsonResponse::build()
                .set_id(lecture.id)
                .set_item(lecture)
                .created("Lecture created")
        })
        .map_err(|err| JsonResponse::<models::Lecture>::build().internal_server_error(err))
}

/// Video urls are hidden from callers without access, except on free
/// preview lectures.
#[tracing::instrument(name = "List lectures.")]
#[get("/{id}/lecture")]
pub async fn list_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user = user.map(|user| user.into_inner());
    let course = guard::fetch_visible_course(pg_pool.get_ref(), path.0, user.as_deref()).await?;
    let has_access = match user.as_deref() {
        Some(user) => guard::has_content_access(pg_pool.get_ref(), &course, user).await?,
        None => false,
    };

    db::lecture::fetch_by_course(pg_pool.get_ref(), course.id)
        .await
        .map(|lectures| {
            let lectures = lectures
                .into_iter()
                .map(|lecture| views::lecture::Lecture::from_model(lecture, has_access))
                .collect::<Vec<_>>();
            JsonResponse::build().set_list(lectures).ok("OK")
        })
        .map_err(|err| JsonResponse::<views::lecture::Lecture>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Update lecture.")]
#[put("/{id}/lecture/{lecture_id}")]
pub async fn update_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32, i32)>,
    form: web::Json<forms::lecture::Lecture>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner().trimmed();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Lecture>::build().form_error(errors.to_string()));
    }

    let (course_id, lecture_id) = path.into_inner();
    let course = guard::fetch_managed_course(pg_pool.get_ref(), course_id, &user).await?;
    let mut lecture = fetch_lecture(pg_pool.get_ref(), course.id, lecture_id).await?;
    form.update(&mut lecture);

    db::lecture::update(pg_pool.get_ref(), lecture)
        .await
        .map(|lecture| {
            JsonResponse::build()
                .set_id(lecture.id)
                .set_item(lecture)
                .ok("Lecture updated")
        })
        .map_err(|err| JsonResponse::<models::Lecture>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Delete lecture.")]
#[delete("/{id}/lecture/{lecture_id}")]
pub async fn delete_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32, i32)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (course_id, lecture_id) = path.into_inner();
    let course = guard::fetch_managed_course(pg_pool.get_ref(), course_id, &user).await?;
    let lecture = fetch_lecture(pg_pool.get_ref(), course.id, lecture_id).await?;

    let unpublished = db::lecture::delete(pg_pool.get_ref(), course.id, lecture.id)
        .await
        .map_err(|err| JsonResponse::<models::Lecture>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Lecture>::build().not_found("Lecture not found"))?;

    let msg = if unpublished {
        tracing::info!("Course {} unpublished after its last lecture was deleted", course.id);
        "Lecture deleted, course unpublished"
    } else {
        "Lecture deleted"
    };

    Ok(JsonResponse::<models::Lecture>::build()
        .set_id(lecture.id)
        .ok(msg))
}

async fn fetch_lecture(
    pool: &PgPool,
    course_id: i32,
    lecture_id: i32,
) -> Result<models::Lecture, actix_web::Error> {
    db::lecture::fetch(pool, course_id, lecture_id)
        .await
        .map_err(|err| JsonResponse::<models::Lecture>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Lecture>::build().not_found("Lecture not found"))
}
