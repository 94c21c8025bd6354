use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add course.")]
#[post("")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::course::Course>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner().trimmed();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Course>::build().form_error(errors.to_string()));
    }

    let course = form.into_model(user.id);
    db::course::insert(pg_pool.get_ref(), course)
        .await
        .map(|course| {
            tracing::info!("Course {} created by {}", course.id, user.id);
            JsonResponse::build()
                .set_id(course.id)
                .set_item(course)
                .created("Course created")
        })
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))
}
