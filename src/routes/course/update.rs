use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use actix_web::{patch, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Update course.")]
#[put("/{id}")]
pub async fn update_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    form: web::Json<forms::course::Course>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner().trimmed();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Course>::build().form_error(errors.to_string()));
    }

    let mut course = guard::fetch_managed_course(pg_pool.get_ref(), path.0, &user).await?;
    form.update(&mut course);

    db::course::update(pg_pool.get_ref(), course)
        .await
        .map(|course| {
            JsonResponse::build()
                .set_id(course.id)
                .set_item(course)
                .ok("Course updated")
        })
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))
}

/// `PATCH /{id}/publish?publish=true|false`. A course needs at least one
/// lecture before it can be published.
#[tracing::instrument(name = "Publish course.")]
#[patch("/{id}/publish")]
pub async fn publish_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    query: web::Query<forms::course::PublishQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let mut course = guard::fetch_managed_course(pg_pool.get_ref(), path.0, &user).await?;

    if query.publish {
        let lectures = db::lecture::count_by_course(pg_pool.get_ref(), course.id)
            .await
            .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))?;
        if lectures == 0 {
            return Err(JsonResponse::<models::Course>::build()
                .bad_request("Add at least one lecture before publishing"));
        }
    }

    course.is_published = query.publish;
    course.updated_at = chrono::Utc::now();
    let msg = if query.publish {
        "Course published"
    } else {
        "Course unpublished"
    };

    db::course::update(pg_pool.get_ref(), course)
        .await
        .map(|course| {
            JsonResponse::build()
                .set_id(course.id)
                .set_item(course)
                .ok(msg)
        })
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))
}
