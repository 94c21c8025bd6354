mod download;
mod get;
mod issue;

pub use download::*;
pub use get::*;
pub use issue::*;

use crate::helpers::JsonResponse;
use crate::models;
use crate::services::CertificateError;

fn certificate_error(err: CertificateError) -> actix_web::Error {
    let response = JsonResponse::<models::CertificateDetails>::build();
    match err {
        CertificateError::NotCompleted => response.bad_request(err.to_string()),
        CertificateError::NotFound(_) => response.not_found(err.to_string()),
        CertificateError::Database(msg) => response.internal_server_error(msg),
        CertificateError::Render(_) | CertificateError::Cancelled => {
            tracing::error!("Certificate rendering failed: {}", err);
            response.internal_server_error("Could not generate certificate")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn errors_map_to_status_codes() {
        let status = |err| certificate_error(err).as_response_error().status_code();
        assert_eq!(status(CertificateError::NotCompleted), StatusCode::BAD_REQUEST);
        assert_eq!(status(CertificateError::NotFound("Course")), StatusCode::NOT_FOUND);
        assert_eq!(
            status(CertificateError::Database("Could not fetch data".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status(CertificateError::Cancelled), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
