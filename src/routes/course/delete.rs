use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Lectures, quizzes, progress and bookmarks go with the course. A course
/// with completed purchases or certificates is kept (409).
#[tracing::instrument(name = "Delete course.")]
#[delete("/{id}")]
pub async fn delete_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = guard::fetch_managed_course(pg_pool.get_ref(), path.0, &user).await?;

    let (purchases, certificates) = db::course::count_enrollments(pg_pool.get_ref(), course.id)
        .await
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))?;
    if purchases > 0 || certificates > 0 {
        return Err(JsonResponse::<models::Course>::build().conflict(
            "Course has enrolled students and cannot be deleted, unpublish it instead",
        ));
    }

    db::course::delete(pg_pool.get_ref(), course.id)
        .await
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))
        .and_then(|deleted| match deleted {
            true => {
                tracing::info!("Course {} deleted by {}", course.id, user.id);
                Ok(JsonResponse::<models::Course>::build()
                    .set_id(course.id)
                    .ok("Course deleted"))
            }
            false => Err(JsonResponse::<models::Course>::build().not_found("Course not found")),
        })
}
