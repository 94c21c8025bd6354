use super::{signature, GatewayOrder, PaymentGateway};
use crate::connectors::errors::ConnectorError;
use async_trait::async_trait;

/// In-process gateway: orders get random ids, signatures are checked with the
/// given secrets exactly like the HTTP client does.
pub struct MockPaymentGateway {
    key_secret: String,
    webhook_secret: String,
    available: bool,
}

impl MockPaymentGateway {
    pub fn new(key_secret: &str, webhook_secret: &str) -> Self {
        Self {
            key_secret: key_secret.to_string(),
            webhook_secret: webhook_secret.to_string(),
            available: true,
        }
    }

    /// A gateway whose order endpoint is down.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new("", "")
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn key_id(&self) -> &str {
        "mock_key_id"
    }

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, ConnectorError> {
        if !self.available {
            return Err(ConnectorError::ServiceUnavailable(
                "mock gateway is down".to_string(),
            ));
        }

        Ok(GatewayOrder {
            id: format!("order_{}", uuid::Uuid::new_v4().simple()),
            amount,
            currency: currency.to_string(),
            receipt: Some(receipt.to_string()),
            status: Some("created".to_string()),
        })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, supplied: &str) -> bool {
        signature::verify_payment(&self.key_secret, order_id, payment_id, supplied)
    }

    fn verify_webhook_signature(&self, body: &[u8], supplied: &str) -> bool {
        signature::verify_body(&self.webhook_secret, body, supplied)
    }
}
