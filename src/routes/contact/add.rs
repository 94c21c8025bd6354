use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Submit contact message.", skip(form, pg_pool))]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::contact::Contact>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner().trimmed();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::ContactMessage>::build().form_error(errors.to_string()));
    }

    let message: models::ContactMessage = form.into();
    db::contact::insert(pg_pool.get_ref(), message)
        .await
        .map(|message| {
            JsonResponse::<models::ContactMessage>::build()
                .set_id(message.id)
                .created("Message received")
        })
        .map_err(|err| JsonResponse::<models::ContactMessage>::build().internal_server_error(err))
}
