mod get;
mod update;

pub use get::*;
pub use update::*;

use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use sqlx::PgPool;

/// Current progress of `user_id` on `course`.
async fn report(
    pool: &PgPool,
    course: models::Course,
    user_id: i32,
) -> Result<views::progress::Progress, actix_web::Error> {
    let internal = |err: String| JsonResponse::<views::progress::Progress>::build().internal_server_error(err);

    let lectures = db::lecture::fetch_by_course(pool, course.id)
        .await
        .map_err(internal)?;
    let progress = match db::progress::fetch(pool, user_id, course.id)
        .await
        .map_err(internal)?
    {
        Some(progress) => {
            let lecture_progress = db::progress::fetch_lectures(pool, progress.id)
                .await
                .map_err(internal)?;
            Some((progress, lecture_progress))
        }
        None => None,
    };

    Ok(views::progress::Progress::new(course, lectures, progress))
}
