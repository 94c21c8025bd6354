use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::views;
use actix_web::{put, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Admin change user role.")]
#[put("/{id}/role")]
pub async fn admin_change_role_handler(
    admin: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    form: web::Json<forms::user::ChangeRole>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let user_id = path.0;
    let mut user = db::user::fetch(pg_pool.get_ref(), user_id)
        .await
        .map_err(|err| JsonResponse::<views::user::User>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::user::User>::build().not_found("User not found"))?;

    if user.id == admin.id && form.role != models::UserRole::Admin {
        return Err(JsonResponse::<views::user::User>::build()
            .bad_request("Admins cannot demote themselves"));
    }

    user.role = form.role.to_string();
    tracing::info!("User {} role set to {} by {}", user.id, user.role, admin.id);

    db::user::update(pg_pool.get_ref(), user)
        .await
        .map(|user| {
            JsonResponse::build()
                .set_item(views::user::User::from(user))
                .ok("Role updated")
        })
        .map_err(|err| JsonResponse::<views::user::User>::build().internal_server_error(err))
}
