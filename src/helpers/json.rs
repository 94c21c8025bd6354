use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T>
where
    T: Serialize,
{
    message: String,
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> Default for JsonResponseBuilder<T>
where
    T: Serialize,
{
    fn default() -> Self {
        Self {
            message: String::new(),
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_msg<I: Into<String>>(mut self, message: I) -> Self {
        self.message = message.into();
        self
    }

    pub fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn to_json_response(self) -> JsonResponse<T> {
        JsonResponse {
            message: self.message,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn to_string(self) -> String {
        serde_json::to_string(&self.to_json_response()).unwrap_or_default()
    }

    pub fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).to_json_response())
    }

    pub fn created<I: Into<String>>(self, msg: I) -> HttpResponse {
        HttpResponse::Created().json(self.set_msg(msg).to_json_response())
    }

    fn error<I: Into<String>>(self, status: StatusCode, msg: I) -> Error {
        let msg = msg.into();
        let response = HttpResponse::build(status).json(self.set_msg(msg.clone()).to_json_response());
        InternalError::from_response(msg, response).into()
    }

    pub fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn form_error<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::UNPROCESSABLE_ENTITY, msg)
    }

    pub fn unauthorized<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::FORBIDDEN, msg)
    }

    pub fn not_found<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::NOT_FOUND, msg)
    }

    pub fn conflict<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::CONFLICT, msg)
    }

    pub fn too_many_requests<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::TOO_MANY_REQUESTS, msg)
    }

    pub fn internal_server_error<I: Into<String>>(self, msg: I) -> Error {
        let msg = msg.into();
        let msg = if msg.trim().is_empty() {
            "Internal error".to_string()
        } else {
            msg
        };
        self.error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl JsonResponse<String> {
    pub fn bad_request<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<String>::build().bad_request(msg)
    }

    pub fn not_found<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<String>::build().not_found(msg)
    }

    pub fn unauthorized<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<String>::build().unauthorized(msg)
    }

    pub fn forbidden<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<String>::build().forbidden(msg)
    }

    pub fn conflict<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<String>::build().conflict(msg)
    }

    pub fn internal_server_error<I: Into<String>>(msg: I) -> Error {
        JsonResponse::<String>::build().internal_server_error(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn list_response_skips_empty_fields() {
        let body = JsonResponse::<i32>::build().set_list(vec![1, 2]).set_msg("OK").to_string();
        assert_eq!(body, r#"{"message":"OK","list":[1,2]}"#);
    }

    #[test]
    fn errors_carry_status_code() {
        let err = JsonResponse::<String>::build().not_found("course not found");
        assert_eq!(err.as_response_error().status_code(), StatusCode::NOT_FOUND);

        let err = JsonResponse::<String>::build().internal_server_error("");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(err.to_string(), "Internal error");
    }
}
