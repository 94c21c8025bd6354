//! External Service Connectors
//!
//! Adapters for talking to services outside of this application. Today that
//! is the payment gateway only.
//!
//! ## Pattern
//!
//! 1. Define a trait in `{service}/mod.rs` so routes can be tested with a mock
//! 2. Implement the HTTP client in `{service}/client.rs`
//! 3. Build the connector from `Settings` in `init`
//! 4. Inject the trait object into routes; handlers never see HTTP details
//!
//! ```ignore
//! pub async fn checkout(
//!     gateway: web::Data<Arc<dyn PaymentGateway>>,
//! ) -> Result<impl Responder> {
//!     let order = gateway.create_order(amount, "INR", &receipt).await?;
//! }
//! ```

pub mod errors;
pub mod payment_gateway;

pub use errors::ConnectorError;
pub use payment_gateway::{
    init as init_payment_gateway, GatewayOrder, MockPaymentGateway, PaymentGateway,
    PaymentGatewayClient,
};
