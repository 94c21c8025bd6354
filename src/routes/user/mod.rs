mod admin;
mod auth;
mod profile;

pub use admin::*;
pub use auth::*;
pub use profile::*;

use crate::configuration::Settings;
use actix_web::cookie::{time::Duration, Cookie, SameSite};

pub(crate) const ACCESS_COOKIE: &str = "access_token";
pub(crate) const REFRESH_COOKIE: &str = "refresh_token";

fn token_cookie(name: &'static str, value: String, ttl_secs: i64, settings: &Settings) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(settings.auth.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl_secs))
        .finish()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").http_only(true).finish();
    cookie.make_removal();
    cookie
}
