use actix_web::dev::ServiceRequest;

/// An expired or invalid `access_token` cookie is ignored; the request then
/// continues as anonymous.
#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let token = match req.cookie("access_token") {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Ok(false),
    };

    tracing::debug!("Found access_token in cookies");
    match super::authenticate_access_token(req, &token).await {
        Ok(()) => Ok(true),
        Err(err) => {
            tracing::debug!("access_token cookie ignored: {}", err);
            Ok(false)
        }
    }
}
