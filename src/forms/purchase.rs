use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct Checkout {
    pub course_id: i32,
}

/// What the hosted payment widget hands back to the client after a payment.
#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct Verify {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub order_id: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub payment_id: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 256)]
    pub signature: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct WebhookPayload {
    pub payment: Option<WebhookPaymentWrapper>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WebhookPaymentWrapper {
    pub entity: WebhookPayment,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WebhookPayment {
    pub id: String,
    pub order_id: Option<String>,
    pub status: Option<String>,
}

impl WebhookEvent {
    /// (order id, payment id) of the payment the event refers to.
    pub fn payment_ref(&self) -> Option<(&str, &str)> {
        let payment = &self.payload.payment.as_ref()?.entity;
        let order_id = payment.order_id.as_deref()?;
        Some((order_id, payment.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_payment_reference_is_extracted() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "event": "payment.captured",
                "payload": {"payment": {"entity": {"id": "pay_1", "order_id": "order_1", "status": "captured"}}}
            }"#,
        )
        .unwrap();
        assert_eq!(event.payment_ref(), Some(("order_1", "pay_1")));
    }

    #[test]
    fn events_without_payment_have_no_reference() {
        let event: WebhookEvent = serde_json::from_str(r#"{"event": "order.paid"}"#).unwrap();
        assert!(event.payment_ref().is_none());
    }
}
