use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MembershipPlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub duration_days: i32,
    pub currency: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl MembershipPlan {
    pub fn new(name: String, price: f64, duration_days: i32, currency: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            price,
            duration_days,
            currency: currency.unwrap_or_else(|| "MXN".to_string()),
            active: true,
            created_at: Utc::now(),
        }
    }
}
