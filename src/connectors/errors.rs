use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;

/// Errors that can occur while talking to an external service
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Non-success HTTP status or transport failure
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Service unreachable or timeout
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Credentials rejected by the service (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ConnectorError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::HttpError(_) => "Payment gateway error",
            Self::ServiceUnavailable(_) => "Payment gateway unavailable",
            Self::InvalidResponse(_) => "Invalid payment gateway response",
            Self::Unauthorized(_) => "Payment gateway rejected credentials",
            Self::Internal(_) => "Internal error",
        };

        HttpResponse::build(self.status_code()).json(json!({
            "message": message,
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::HttpError(_) => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            // our credentials are wrong, not the caller's
            Self::Unauthorized(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_failures_map_to_gateway_statuses() {
        assert_eq!(
            ConnectorError::HttpError("500".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ConnectorError::ServiceUnavailable("timeout".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ConnectorError::Unauthorized("bad key".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
