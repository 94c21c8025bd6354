use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Submit quiz attempt.")]
#[post("/{quiz_id}/attempt")]
pub async fn attempt_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    form: web::Json<forms::quiz::Attempt>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let pool = pg_pool.get_ref();
    let quiz = super::fetch_accessible_quiz(pool, path.0, &user).await?;

    let questions = db::quiz::fetch_questions(pool, quiz.id)
        .await
        .map_err(|err| JsonResponse::<models::QuizAttempt>::build().internal_server_error(err))?;
    let (score, total) = models::grade(&questions, &form.answers);

    let mut attempt = models::QuizAttempt::default();
    attempt.quiz_id = quiz.id;
    attempt.user_id = user.id;
    attempt.score = score;
    attempt.total = total;
    attempt.passed = models::is_passing(score, total, quiz.pass_percentage);
    attempt.created_at = chrono::Utc::now();

    db::quiz::insert_attempt(pool, attempt)
        .await
        .map(|attempt| {
            let msg = if attempt.passed { "Quiz passed" } else { "Quiz failed" };
            JsonResponse::build()
                .set_id(attempt.id)
                .set_item(attempt)
                .created(msg)
        })
        .map_err(|err| JsonResponse::<models::QuizAttempt>::build().internal_server_error(err))
}
