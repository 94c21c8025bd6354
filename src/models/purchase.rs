use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseStatus::Pending => write!(f, "pending"),
            PurchaseStatus::Completed => write!(f, "completed"),
            PurchaseStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PurchaseStatus::Pending),
            "completed" => Ok(PurchaseStatus::Completed),
            "failed" => Ok(PurchaseStatus::Failed),
            other => Err(format!("unknown purchase status: {}", other)),
        }
    }
}

/// A checkout session: one gateway order for one course and user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Purchase {
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    pub amount: i32,
    pub currency: String,
    pub status: String,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Purchase {
    pub fn new(course_id: i32, user_id: i32, amount: i32, currency: String, order_id: String) -> Self {
        Self {
            id: 0,
            course_id,
            user_id,
            amount,
            currency,
            status: PurchaseStatus::Pending.to_string(),
            order_id,
            payment_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn status(&self) -> Option<PurchaseStatus> {
        self.status.parse().ok()
    }

    pub fn is_completed(&self) -> bool {
        self.status() == Some(PurchaseStatus::Completed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct PurchaseWithCourse {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub purchase: Purchase,
    pub course_title: String,
    pub course_thumbnail_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_purchase_is_pending() {
        let purchase = Purchase::new(3, 9, 499, "INR".to_string(), "order_1".to_string());
        assert_eq!(purchase.status(), Some(PurchaseStatus::Pending));
        assert!(!purchase.is_completed());
        assert!(purchase.payment_id.is_none());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            PurchaseStatus::Pending,
            PurchaseStatus::Completed,
            PurchaseStatus::Failed,
        ] {
            assert_eq!(status.to_string().parse::<PurchaseStatus>().unwrap(), status);
        }
        assert!("refunded".parse::<PurchaseStatus>().is_err());
    }
}
