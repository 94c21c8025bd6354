use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "List course quizzes.")]
#[get("/course/{course_id}")]
pub async fn list_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let pool = pg_pool.get_ref();
    let internal = |err: String| JsonResponse::<views::quiz::Quiz>::build().internal_server_error(err);

    let course = guard::fetch_course(pool, path.0).await?;
    guard::require_content_access(pool, &course, &user).await?;

    let quizzes = db::quiz::fetch_by_course(pool, course.id)
        .await
        .map_err(internal)?;
    let mut list = Vec::with_capacity(quizzes.len());
    for quiz in quizzes {
        let questions = db::quiz::fetch_questions(pool, quiz.id)
            .await
            .map_err(internal)?;
        list.push(views::quiz::Quiz::new(quiz, questions));
    }

    Ok(JsonResponse::build().set_list(list).ok("OK"))
}

#[tracing::instrument(name = "List own quiz attempts.")]
#[get("/{quiz_id}/attempts")]
pub async fn attempts_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let quiz = super::fetch_accessible_quiz(pg_pool.get_ref(), path.0, &user).await?;

    db::quiz::fetch_attempts(pg_pool.get_ref(), quiz.id, user.id)
        .await
        .map(|attempts| JsonResponse::build().set_list(attempts).ok("OK"))
        .map_err(|err| JsonResponse::<models::QuizAttempt>::build().internal_server_error(err))
}
