use crate::configuration::Settings;
use crate::connectors::PaymentGateway;
use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::routes::guard;
use crate::views;
use actix_web::{post, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Opens a checkout session for a published course.
///
/// Free courses are enrolled immediately; paid ones get a gateway order that
/// the browser widget completes, followed by `POST /verify`.
#[tracing::instrument(name = "Checkout.", skip(gateway, settings))]
#[post("/checkout")]
pub async fn checkout_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::purchase::Checkout>,
    pg_pool: web::Data<PgPool>,
    gateway: web::Data<Arc<dyn PaymentGateway>>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let course = guard::fetch_course(pg_pool.get_ref(), form.course_id).await?;
    if !course.is_published {
        return Err(JsonResponse::<views::purchase::CheckoutSession>::build()
            .not_found("Course not found"));
    }

    if guard::is_enrolled(pg_pool.get_ref(), user.id, course.id).await? {
        return Err(JsonResponse::<views::purchase::CheckoutSession>::build()
            .conflict("You have already purchased this course"));
    }

    let currency = settings.payment.currency.clone();
    let (purchase, amount) = if course.is_free() {
        let mut purchase = models::Purchase::new(
            course.id,
            user.id,
            0,
            currency,
            format!("free_{}", uuid::Uuid::new_v4().simple()),
        );
        purchase.status = models::PurchaseStatus::Completed.to_string();
        (purchase, 0)
    } else {
        let receipt = format!("course_{}_user_{}", course.id, user.id);
        let order = gateway
            .create_order(course.amount_minor(), &currency, &receipt)
            .await?;
        let amount = order.amount;
        (
            models::Purchase::new(course.id, user.id, course.price, currency, order.id),
            amount,
        )
    };

    let purchase = db::purchase::insert(pg_pool.get_ref(), purchase)
        .await
        .map_err(|err| {
            JsonResponse::<views::purchase::CheckoutSession>::build().internal_server_error(err)
        })?
        .ok_or_else(|| {
            JsonResponse::<views::purchase::CheckoutSession>::build()
                .conflict("You have already purchased this course")
        })?;

    tracing::info!(
        "Purchase {} ({}) opened for course {} by user {}",
        purchase.id,
        purchase.status,
        purchase.course_id,
        purchase.user_id
    );
    let msg = if purchase.is_completed() {
        "Enrolled in free course"
    } else {
        "Checkout session created"
    };

    Ok(JsonResponse::build()
        .set_id(purchase.id)
        .set_item(views::purchase::CheckoutSession::new(
            &purchase,
            amount,
            gateway.key_id(),
        ))
        .created(msg))
}
