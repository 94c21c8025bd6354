use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use actix_web::{post, web, Responder, Result};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct BookmarkState {
    pub course_id: i32,
    pub bookmarked: bool,
}

#[tracing::instrument(name = "Add bookmark.")]
#[post("")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::bookmark::AddBookmark>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = guard::fetch_visible_course(pg_pool.get_ref(), form.course_id, Some(&**user)).await?;

    db::bookmark::insert(pg_pool.get_ref(), user.id, course.id)
        .await
        .map(|_| {
            JsonResponse::build()
                .set_item(BookmarkState {
                    course_id: course.id,
                    bookmarked: true,
                })
                .created("Bookmark added")
        })
        .map_err(|err| JsonResponse::<BookmarkState>::build().internal_server_error(err))
}

/// Adds the bookmark when missing, removes it otherwise.
#[tracing::instrument(name = "Toggle bookmark.")]
#[post("/{course_id}/toggle")]
pub async fn toggle_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let pool = pg_pool.get_ref();
    let internal = |err: String| JsonResponse::<BookmarkState>::build().internal_server_error(err);

    // removing needs no visibility check; the course may have been unpublished since
    let removed = db::bookmark::delete(pool, user.id, path.0)
        .await
        .map_err(internal)?;
    if removed {
        return Ok(JsonResponse::build()
            .set_item(BookmarkState {
                course_id: path.0,
                bookmarked: false,
            })
            .ok("Bookmark removed"));
    }

    let course = guard::fetch_visible_course(pool, path.0, Some(&**user)).await?;
    db::bookmark::insert(pool, user.id, course.id)
        .await
        .map_err(internal)?;

    Ok(JsonResponse::build()
        .set_item(BookmarkState {
            course_id: course.id,
            bookmarked: true,
        })
        .ok("Bookmark added"))
}
