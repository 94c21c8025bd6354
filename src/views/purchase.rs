use crate::models;
use serde::Serialize;

/// What the browser needs to open the hosted payment widget.
#[derive(Debug, Serialize)]
pub struct CheckoutSession {
    pub purchase_id: i32,
    pub course_id: i32,
    pub order_id: String,
    /// Minor currency units, as the widget expects
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    pub status: String,
}

impl CheckoutSession {
    pub fn new(purchase: &models::Purchase, amount: i64, key_id: &str) -> Self {
        Self {
            purchase_id: purchase.id,
            course_id: purchase.course_id,
            order_id: purchase.order_id.clone(),
            amount,
            currency: purchase.currency.clone(),
            key_id: key_id.to_string(),
            status: purchase.status.clone(),
        }
    }
}
