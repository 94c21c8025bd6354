//! Role based access control.
//!
//! Requests are checked against `access_control.conf` (model) and
//! `access_control.csv` (policy) as `(role, path, method)`. The role is the
//! [`AccessSubject`] left in the request extensions by the authentication
//! middleware.

use crate::helpers::JsonResponse;
use crate::middleware::authentication::AccessSubject;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use casbin::{CoreApi, DefaultModel, Enforcer, FileAdapter};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::io::{Error as IoError, ErrorKind};
use std::rc::Rc;
use std::sync::Arc;

pub const MODEL_PATH: &str = "access_control.conf";
pub const POLICY_PATH: &str = "access_control.csv";

#[derive(Clone)]
pub struct AccessControl {
    enforcer: Arc<Enforcer>,
}

impl AccessControl {
    pub async fn try_new(model_path: &str, policy_path: &str) -> Result<Self, IoError> {
        let m = DefaultModel::from_file(model_path)
            .await
            .map_err(|err| IoError::new(ErrorKind::Other, format!("{err:?}")))?;
        let a = FileAdapter::new(policy_path.to_string());

        let enforcer = Enforcer::new(m, a)
            .await
            .map_err(|err| IoError::new(ErrorKind::Other, format!("{err:?}")))?;

        Ok(Self {
            enforcer: Arc::new(enforcer),
        })
    }

    /// Loads the model and policy shipped next to the binary.
    pub async fn from_default_files() -> Result<Self, IoError> {
        Self::try_new(MODEL_PATH, POLICY_PATH).await
    }

    pub fn is_allowed(&self, subject: &str, path: &str, method: &str) -> Result<bool, String> {
        self.enforcer
            .enforce((subject, normalize_path(path), method))
            .map_err(|err| {
                tracing::error!("casbin enforce failed: {:?}", err);
                "access control failure".to_string()
            })
    }
}

/// `/api/v1/course/` and `/api/v1/course` are the same resource.
fn normalize_path(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessControl
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessControlMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessControlMiddleware {
            service: Rc::new(service),
            access: self.clone(),
        }))
    }
}

pub struct AccessControlMiddleware<S> {
    service: Rc<S>,
    access: AccessControl,
}

impl<S, B> Service<ServiceRequest> for AccessControlMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let subject = req
            .extensions()
            .get::<AccessSubject>()
            .cloned()
            .unwrap_or_else(AccessSubject::anonym);
        let decision = self
            .access
            .is_allowed(&subject.0, req.path(), req.method().as_str());

        Box::pin(async move {
            match decision {
                Ok(true) => service.call(req).await,
                Ok(false) if subject.is_anonym() => {
                    Err(JsonResponse::<String>::build().unauthorized("Authentication required"))
                }
                Ok(false) => {
                    tracing::info!(
                        "Access denied for role {} to {} {}",
                        subject.0,
                        req.method(),
                        req.path()
                    );
                    Err(JsonResponse::forbidden("Access denied"))
                }
                Err(msg) => Err(JsonResponse::internal_server_error(msg)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_path(file: &str) -> String {
        format!("{}/{}", env!("CARGO_MANIFEST_DIR"), file)
    }

    async fn access() -> AccessControl {
        AccessControl::try_new(&policy_path(MODEL_PATH), &policy_path(POLICY_PATH))
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn anonymous_can_browse_but_not_buy() {
        let access = access().await;
        assert!(access
            .is_allowed("anonym", "/api/v1/course/published-courses", "GET")
            .unwrap());
        assert!(access.is_allowed("anonym", "/api/v1/course/12", "GET").unwrap());
        assert!(!access
            .is_allowed("anonym", "/api/v1/purchase/checkout", "POST")
            .unwrap());
    }

    #[actix_web::test]
    async fn roles_inherit_permissions() {
        let access = access().await;
        assert!(access
            .is_allowed("student", "/api/v1/purchase/checkout", "POST")
            .unwrap());
        assert!(!access.is_allowed("student", "/api/v1/course", "POST").unwrap());
        assert!(access.is_allowed("instructor", "/api/v1/course/", "POST").unwrap());
        assert!(access
            .is_allowed("instructor", "/api/v1/bookmark/3/toggle", "POST")
            .unwrap());
        assert!(!access
            .is_allowed("instructor", "/api/v1/admin/contact", "GET")
            .unwrap());
        assert!(access.is_allowed("admin", "/api/v1/admin/contact", "GET").unwrap());
        assert!(access
            .is_allowed("admin", "/api/v1/course/5/lecture/9", "DELETE")
            .unwrap());
    }

    #[actix_web::test]
    async fn methods_are_matched_exactly() {
        let access = access().await;
        assert!(!access
            .is_allowed("anonym", "/api/v1/course/12", "DELETE")
            .unwrap());
        assert!(!access.is_allowed("admin", "/api/v1/contact", "GET").unwrap());
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(normalize_path("/api/v1/bookmark/"), "/api/v1/bookmark");
        assert_eq!(normalize_path("/"), "/");
    }
}
