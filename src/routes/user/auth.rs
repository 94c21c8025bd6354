use super::{removal_cookie, token_cookie, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers::{password, JsonResponse, RefreshThrottle, TokenKind, TokenService};
use crate::models;
use crate::views;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder, Result};
use serde_json::json;
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Register user.", skip(form, pg_pool))]
#[post("/register")]
pub async fn register_handler(
    form: web::Json<forms::user::Register>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::user::User>::build().form_error(errors.to_string()));
    }

    let email = forms::user::normalize_email(&form.email);
    let existing = db::user::fetch_by_email(pg_pool.get_ref(), &email)
        .await
        .map_err(|err| JsonResponse::<views::user::User>::build().internal_server_error(err))?;
    if existing.is_some() {
        return Err(JsonResponse::<views::user::User>::build()
            .conflict("User with that email already exists"));
    }

    let password_hash = password::hash_password(&form.password)
        .map_err(|err| JsonResponse::<views::user::User>::build().internal_server_error(err))?;
    let user = form.into_inner().into_user(password_hash);

    db::user::insert(pg_pool.get_ref(), user)
        .await
        .map(|user| {
            tracing::info!("User {} registered", user.id);
            JsonResponse::build()
                .set_id(user.id)
                .set_item(views::user::User::from(user))
                .created("Account created")
        })
        .map_err(|err| JsonResponse::<views::user::User>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Login.", skip(form, pg_pool, tokens, settings))]
#[post("/login")]
pub async fn login_handler(
    form: web::Json<forms::user::Login>,
    pg_pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::user::Session>::build().form_error(errors.to_string()));
    }

    let email = forms::user::normalize_email(&form.email);
    let user = db::user::fetch_by_email(pg_pool.get_ref(), &email)
        .await
        .map_err(|err| JsonResponse::<views::user::Session>::build().internal_server_error(err))?
        .filter(|user| password::verify_password(&form.password, &user.password_hash))
        .ok_or_else(|| JsonResponse::unauthorized("Incorrect email or password"))?;

    let access_token = issue(&tokens, &user, TokenKind::Access)?;
    let refresh_token = issue(&tokens, &user, TokenKind::Refresh)?;
    tracing::info!("User {} logged in", user.id);

    let body = JsonResponse::build()
        .set_id(user.id)
        .set_item(views::user::Session {
            user: user.into(),
            access_token: access_token.clone(),
            refresh_token: refresh_token.clone(),
        })
        .set_msg("Welcome back")
        .to_json_response();

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(
            ACCESS_COOKIE,
            access_token,
            tokens.ttl(TokenKind::Access),
            &settings,
        ))
        .cookie(token_cookie(
            REFRESH_COOKIE,
            refresh_token,
            tokens.ttl(TokenKind::Refresh),
            &settings,
        ))
        .json(body))
}

/// Trades a refresh token (cookie or body) for a new access token. A user can
/// refresh at most once per `auth.refresh_min_interval_secs`.
#[tracing::instrument(name = "Refresh token.", skip_all)]
#[post("/refresh-token")]
pub async fn refresh_token_handler(
    req: HttpRequest,
    form: Option<web::Json<forms::user::RefreshToken>>,
    pg_pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    throttle: web::Data<RefreshThrottle>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse> {
    let token = form
        .and_then(|form| form.into_inner().refresh_token)
        .filter(|token| !token.is_empty())
        .or_else(|| req.cookie(REFRESH_COOKIE).map(|c| c.value().to_string()))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| JsonResponse::unauthorized("Refresh token is missing"))?;

    let claims = tokens
        .verify(&token, TokenKind::Refresh)
        .map_err(JsonResponse::unauthorized)?;
    let user_id = claims.user_id().map_err(JsonResponse::unauthorized)?;

    if !throttle.try_acquire(user_id) {
        let wait = throttle
            .remaining(user_id)
            .map(|d| d.as_secs().max(1))
            .unwrap_or(1);
        tracing::warn!("Refresh throttled for user {}", user_id);
        return Err(JsonResponse::<String>::build()
            .too_many_requests(format!("Token was refreshed recently, retry in {}s", wait)));
    }

    let user = db::user::fetch(pg_pool.get_ref(), user_id)
        .await
        .map_err(JsonResponse::internal_server_error)?
        .ok_or_else(|| JsonResponse::unauthorized("User no longer exists"))?;

    let access_token = issue(&tokens, &user, TokenKind::Access)?;
    Ok(HttpResponse::Ok()
        .cookie(token_cookie(
            ACCESS_COOKIE,
            access_token.clone(),
            tokens.ttl(TokenKind::Access),
            &settings,
        ))
        .json(json!({
            "message": "Token refreshed",
            "access_token": access_token,
        })))
}

#[tracing::instrument(name = "Logout.")]
#[get("/logout")]
pub async fn logout_handler() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_COOKIE))
        .cookie(removal_cookie(REFRESH_COOKIE))
        .json(JsonResponse::<String>::build().set_msg("Logged out").to_json_response())
}

fn issue(tokens: &TokenService, user: &models::User, kind: TokenKind) -> Result<String> {
    tokens
        .issue(user.id, &user.email, &user.role, kind)
        .map_err(JsonResponse::internal_server_error)
}
