use crate::configuration::Settings;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::services;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Issue certificate.", skip(settings))]
#[post("/{course_id}")]
pub async fn issue_handler(
    user: web::ReqData<Arc<models::User>>,
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let course = guard::fetch_course(pg_pool.get_ref(), path.0).await?;
    guard::require_content_access(pg_pool.get_ref(), &course, &user).await?;

    let details = services::certificate::issue(
        pg_pool.get_ref(),
        &settings.certificates,
        user.id,
        course.id,
    )
    .await
    .map_err(super::certificate_error)?;

    Ok(JsonResponse::build().set_item(details).ok("Certificate issued"))
}
