mod f_anonym;
mod f_cookie;
mod f_jwt;

pub use f_anonym::anonym;
pub use f_cookie::try_cookie;
pub use f_jwt::try_jwt;

use crate::db;
use crate::helpers::{TokenKind, TokenService};
use crate::middleware::authentication::AccessSubject;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use sqlx::PgPool;
use std::sync::Arc;

/// Verifies an access token and attaches the user it belongs to.
///
/// The user row is re-read on every request so that role changes and
/// deleted accounts take effect before the token expires.
async fn authenticate_access_token(req: &mut ServiceRequest, token: &str) -> Result<(), String> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| "token service is not configured".to_string())?;
    let claims = tokens.verify(token, TokenKind::Access)?;
    let user_id = claims.user_id()?;

    let pool = req
        .app_data::<web::Data<PgPool>>()
        .ok_or_else(|| "database is not configured".to_string())?;
    let user = db::user::fetch(pool.get_ref(), user_id)
        .await?
        .ok_or_else(|| "user no longer exists".to_string())?;

    tracing::debug!("ACL check for role: {}", user.role);
    let acl_vals = AccessSubject(user.role.clone());

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    if req.extensions_mut().insert(acl_vals).is_some() {
        return Err("Something wrong with access control".to_string());
    }

    Ok(())
}
