use crate::helpers::extract_bearer_token;
use crate::middleware::authentication::get_header;
use actix_web::dev::ServiceRequest;

#[tracing::instrument(name = "Authenticate with JWT", skip(req))]
pub async fn try_jwt(req: &mut ServiceRequest) -> Result<bool, String> {
    let authorization = match get_header::<String>(req, "authorization")? {
        Some(value) => value,
        None => return Ok(false),
    };

    let token = match extract_bearer_token(&authorization) {
        Ok(token) => token.to_string(),
        // not a bearer token, try other auth methods
        Err(_) => return Ok(false),
    };

    super::authenticate_access_token(req, &token).await?;
    Ok(true)
}
