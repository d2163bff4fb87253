use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub membership_id: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub method: String,
    pub status: String,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewPaymentParams {
    pub user_id: String,
    pub membership_id: Option<String>,
    pub amount: f64,
    pub currency: Option<String>,
    pub method: String,
    pub status: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn new(params: NewPaymentParams) -> Self {
        let status = params.status.unwrap_or_else(|| "PENDING".to_string());
        let paid_at = match params.paid_at {
            Some(ts) => Some(ts),
            None if status == "PAID" => Some(Utc::now()),
            None => None,
        };

        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            membership_id: params.membership_id,
            amount: params.amount,
            currency: params.currency.unwrap_or_else(|| "MXN".to_string()),
            method: params.method,
            status,
            paid_at,
            created_at: Utc::now(),
        }
    }
}
