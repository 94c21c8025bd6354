use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{get, put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Get profile.")]
#[get("/profile")]
pub async fn profile_handler(
    user: web::ReqData<Arc<models::User>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let enrolled_courses = db::course::fetch_enrolled(pg_pool.get_ref(), user.id)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?;

    let profile = views::user::Profile {
        user: user.as_ref().clone().into(),
        enrolled_courses,
    };

    Ok(JsonResponse::build().set_item(profile).ok("OK"))
}

#[tracing::instrument(name = "Update profile.")]
#[put("/profile")]
pub async fn update_profile_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::user::UpdateProfile>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::user::User>::build().form_error(errors.to_string()));
    }

    let mut user = user.as_ref().clone();
    form.into_inner().update(&mut user);

    db::user::update(pg_pool.get_ref(), user)
        .await
        .map(|user| {
            JsonResponse::build()
                .set_item(views::user::User::from(user))
                .ok("Profile updated")
        })
        .map_err(|err| JsonResponse::<views::user::User>::build().internal_server_error(err))
}
