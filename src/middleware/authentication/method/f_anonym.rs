use crate::middleware::authentication::AccessSubject;
use actix_web::dev::ServiceRequest;
use actix_web::HttpMessage;

#[tracing::instrument(name = "authenticate as anonym", skip(req))]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    if req.extensions_mut().insert(AccessSubject::anonym()).is_some() {
        return Err("sth wrong with access control".to_string());
    }

    Ok(true)
}
