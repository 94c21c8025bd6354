use crate::health::{ComponentStatus, HealthChecker};
use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

#[get("")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[tracing::instrument(name = "Health status.", skip(checker))]
#[get("/status")]
pub async fn health_status(checker: web::Data<Arc<HealthChecker>>) -> HttpResponse {
    let report = checker.check_all().await;
    if report.status != ComponentStatus::Unhealthy {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}
