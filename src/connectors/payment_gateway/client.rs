use super::{signature, GatewayOrder, PaymentGateway};
use crate::configuration::PaymentSettings;
use crate::connectors::errors::ConnectorError;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::Instrument;

#[derive(Debug, Serialize)]
struct CreateOrder<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

/// HTTP client for the gateway's orders API (basic auth with the key pair)
pub struct PaymentGatewayClient {
    base_url: String,
    key_id: String,
    key_secret: String,
    webhook_secret: String,
    http_client: reqwest::Client,
}

impl PaymentGatewayClient {
    pub fn new(settings: &PaymentSettings) -> Result<Self, ConnectorError> {
        let timeout = std::time::Duration::from_secs(settings.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectorError::Internal(format!("Failed to create HTTP client: {}", err)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            key_id: settings.key_id.clone(),
            key_secret: settings.key_secret.clone(),
            webhook_secret: settings.webhook_secret.clone(),
            http_client,
        })
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PaymentGatewayClient {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, ConnectorError> {
        let span = tracing::info_span!("payment_gateway_create_order", amount, currency, receipt);
        let url = format!("{}/v1/orders", self.base_url);

        let resp = self
            .http_client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&CreateOrder {
                amount,
                currency,
                receipt,
            })
            .send()
            .instrument(span)
            .await
            .map_err(|err| {
                tracing::error!("create_order error: {:?}", err);
                ConnectorError::from(err)
            })?;

        match resp.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ConnectorError::Unauthorized(
                    "Gateway rejected the key pair".to_string(),
                ));
            }
            status => {
                let text = resp.text().await.unwrap_or_default();
                tracing::error!("create_order failed with {}: {}", status, text);
                return Err(ConnectorError::HttpError(format!(
                    "Gateway responded with {}",
                    status
                )));
            }
        }

        let order = resp.json::<GatewayOrder>().await.map_err(|err| {
            tracing::error!("create_order response could not be parsed: {:?}", err);
            ConnectorError::InvalidResponse(err.to_string())
        })?;

        tracing::info!("Gateway order {} created", order.id);
        Ok(order)
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, supplied: &str) -> bool {
        signature::verify_payment(&self.key_secret, order_id, payment_id, supplied)
    }

    fn verify_webhook_signature(&self, body: &[u8], supplied: &str) -> bool {
        signature::verify_body(&self.webhook_secret, body, supplied)
    }
}
