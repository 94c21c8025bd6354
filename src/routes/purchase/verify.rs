use crate::connectors::PaymentGateway;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use std::sync::Arc;

/// Confirms a payment made in the hosted widget.
///
/// The widget returns `signature = hex(HMAC_SHA256(key_secret, order_id|payment_id))`.
/// A valid signature completes the purchase, an invalid one fails it.
/// Verifying a purchase that is already completed succeeds again.
#[tracing::instrument(name = "Verify payment.", skip(gateway))]
#[post("/verify")]
pub async fn verify_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::purchase::Verify>,
    pg_pool: web::Data<PgPool>,
    gateway: web::Data<Arc<dyn PaymentGateway>>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Purchase>::build().form_error(errors.to_string()));
    }

    let purchase = db::purchase::fetch_by_order(pg_pool.get_ref(), &form.order_id)
        .await
        .map_err(|err| JsonResponse::<models::Purchase>::build().internal_server_error(err))?
        .filter(|purchase| purchase.user_id == user.id)
        .ok_or_else(|| JsonResponse::<models::Purchase>::build().not_found("Purchase not found"))?;

    match purchase.status() {
        Some(models::PurchaseStatus::Completed) => {
            return Ok(JsonResponse::build()
                .set_id(purchase.id)
                .set_item(purchase)
                .ok("Payment already verified"));
        }
        Some(models::PurchaseStatus::Pending) => {}
        _ => {
            return Err(JsonResponse::<models::Purchase>::build()
                .not_found("No pending purchase for this order"));
        }
    }

    if !gateway.verify_payment_signature(&form.order_id, &form.payment_id, &form.signature) {
        tracing::warn!("Signature mismatch for order {}", form.order_id);
        db::purchase::set_status(
            pg_pool.get_ref(),
            purchase.id,
            models::PurchaseStatus::Failed,
            Some(&form.payment_id),
        )
        .await
        .map_err(|err| JsonResponse::<models::Purchase>::build().internal_server_error(err))?;

        return Err(JsonResponse::<models::Purchase>::build()
            .bad_request("Payment verification failed"));
    }

    // another checkout of the same course completed first
    if guard::is_enrolled(pg_pool.get_ref(), purchase.user_id, purchase.course_id).await? {
        tracing::warn!(
            "Order {} paid for course {} already owned by user {}",
            form.order_id,
            purchase.course_id,
            purchase.user_id
        );
        return Err(JsonResponse::<models::Purchase>::build()
            .conflict("You have already purchased this course"));
    }

    let updated = db::purchase::set_status(
        pg_pool.get_ref(),
        purchase.id,
        models::PurchaseStatus::Completed,
        Some(&form.payment_id),
    )
    .await
    .map_err(|err| JsonResponse::<models::Purchase>::build().internal_server_error(err))?;

    // None: the webhook completed it in the meantime
    let purchase = match updated {
        Some(purchase) => purchase,
        None => db::purchase::fetch_by_order(pg_pool.get_ref(), &form.order_id)
            .await
            .map_err(|err| JsonResponse::<models::Purchase>::build().internal_server_error(err))?
            .ok_or_else(|| {
                JsonResponse::<models::Purchase>::build().not_found("Purchase not found")
            })?,
    };

    tracing::info!("Purchase {} completed", purchase.id);
    Ok(JsonResponse::build()
        .set_id(purchase.id)
        .set_item(purchase)
        .ok("Payment verified"))
}
