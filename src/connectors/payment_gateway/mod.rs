//! Payment gateway connector
//!
//! Creates orders for the hosted checkout widget and verifies the signatures
//! the gateway attaches to payment callbacks.

use crate::configuration::Settings;
use crate::connectors::errors::ConnectorError;
use actix_web::web;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod client;
pub mod mock;
pub mod signature;

pub use client::PaymentGatewayClient;
pub use mock::MockPaymentGateway;

/// Order as returned by the gateway's `POST /v1/orders`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayOrder {
    pub id: String,
    /// Minor currency units
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key handed to the browser widget
    fn key_id(&self) -> &str;

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, ConnectorError>;

    /// Checks the signature returned by the widget after a successful payment.
    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;

    /// Checks the `x-gateway-signature` header of a webhook call.
    fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> bool;
}

/// Builds the gateway connector from settings.
///
/// Outside of production a missing key pair falls back to the mock so that a
/// local checkout can be exercised without gateway credentials.
pub fn init(settings: &Settings) -> Result<web::Data<Arc<dyn PaymentGateway>>, ConnectorError> {
    let payment = &settings.payment;
    let configured = !payment.key_id.trim().is_empty() && !payment.key_secret.trim().is_empty();

    let connector: Arc<dyn PaymentGateway> = if configured || settings.is_production() {
        tracing::info!("Initializing payment gateway connector: {}", payment.base_url);
        Arc::new(PaymentGatewayClient::new(payment)?)
    } else {
        tracing::warn!("Payment gateway credentials are not set - using mock");
        Arc::new(MockPaymentGateway::new(
            &payment.key_secret,
            &payment.webhook_secret,
        ))
    };

    Ok(web::Data::new(connector))
}
