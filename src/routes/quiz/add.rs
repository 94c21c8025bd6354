use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add quiz.")]
#[post("/course/{course_id}")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    form: web::Json<forms::quiz::Quiz>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let course = guard::fetch_managed_course(pg_pool.get_ref(), path.0, &user).await?;

    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::quiz::Quiz>::build().form_error(errors.to_string()));
    }
    form.check()
        .map_err(|msg| JsonResponse::<views::quiz::Quiz>::build().form_error(msg))?;

    let (quiz, questions) = form.into_inner().into_models(course.id);
    db::quiz::insert(pg_pool.get_ref(), quiz, questions)
        .await
        .map(|(quiz, questions)| {
            let id = quiz.id;
            JsonResponse::build()
                .set_id(id)
                .set_item(views::quiz::Quiz::new(quiz, questions))
                .created("Quiz created")
        })
        .map_err(|err| JsonResponse::<views::quiz::Quiz>::build().internal_server_error(err))
}
