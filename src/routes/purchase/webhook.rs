use crate::connectors::PaymentGateway;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use actix_web::{post, web, HttpRequest, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "x-gateway-signature";

/// Server-to-server payment notifications.
///
/// The body is authenticated with `hex(HMAC_SHA256(webhook_secret, body))`
/// in the `x-gateway-signature` header, so it is read raw before parsing.
#[tracing::instrument(name = "Payment webhook.", skip_all)]
#[post("/webhook")]
pub async fn webhook_handler(
    req: HttpRequest,
    body: web::Bytes,
    pg_pool: web::Data<PgPool>,
    gateway: web::Data<Arc<dyn PaymentGateway>>,
) -> Result<impl Responder> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| JsonResponse::bad_request("Missing webhook signature"))?;

    if !gateway.verify_webhook_signature(&body, signature) {
        tracing::warn!("Webhook signature mismatch");
        return Err(JsonResponse::bad_request("Invalid webhook signature"));
    }

    let event: forms::purchase::WebhookEvent = serde_json::from_slice(&body)
        .map_err(|err| JsonResponse::bad_request(format!("Invalid webhook payload: {}", err)))?;

    let status = match event.event.as_str() {
        "payment.captured" => models::PurchaseStatus::Completed,
        "payment.failed" => models::PurchaseStatus::Failed,
        other => {
            tracing::info!("Ignoring webhook event {}", other);
            return Ok(JsonResponse::<String>::build().ok("Event ignored"));
        }
    };

    let (order_id, payment_id) = match event.payment_ref() {
        Some(reference) => reference,
        None => {
            tracing::warn!("Webhook {} carries no payment reference", event.event);
            return Ok(JsonResponse::<String>::build().ok("Event ignored"));
        }
    };

    let purchase = db::purchase::fetch_by_order(pg_pool.get_ref(), order_id)
        .await
        .map_err(JsonResponse::internal_server_error)?;
    let purchase = match purchase {
        Some(purchase) => purchase,
        None => {
            tracing::warn!("Webhook for unknown order {}", order_id);
            return Ok(JsonResponse::<String>::build().ok("Unknown order"));
        }
    };

    if status == models::PurchaseStatus::Completed
        && !purchase.is_completed()
        && guard::is_enrolled(pg_pool.get_ref(), purchase.user_id, purchase.course_id).await?
    {
        tracing::warn!(
            "Order {} captured for course {} already owned by user {}",
            order_id,
            purchase.course_id,
            purchase.user_id
        );
        return Ok(JsonResponse::<String>::build().ok("Course already purchased"));
    }

    let updated = db::purchase::set_status(pg_pool.get_ref(), purchase.id, status, Some(payment_id))
        .await
        .map_err(JsonResponse::internal_server_error)?;

    match updated {
        Some(purchase) => tracing::info!("Purchase {} is now {}", purchase.id, purchase.status),
        None => tracing::info!("Purchase {} was already completed", purchase.id),
    }

    Ok(JsonResponse::<String>::build().ok("Event processed"))
}
