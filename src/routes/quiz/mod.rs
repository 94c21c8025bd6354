mod add;
mod attempt;
mod get;

pub use add::*;
pub use attempt::*;
pub use get::*;

use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use sqlx::PgPool;

/// The quiz, once the user is known to have access to its course.
async fn fetch_accessible_quiz(
    pool: &PgPool,
    quiz_id: i32,
    user: &models::User,
) -> Result<models::Quiz, actix_web::Error> {
    let quiz = db::quiz::fetch(pool, quiz_id)
        .await
        .map_err(|err| JsonResponse::<models::Quiz>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Quiz>::build().not_found("Quiz not found"))?;

    let course = guard::fetch_course(pool, quiz.course_id).await?;
    guard::require_content_access(pool, &course, user).await?;

    Ok(quiz)
}
