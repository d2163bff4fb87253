use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

use crate::domain::models::plan::MembershipPlan;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Membership {
    pub id: String,
    pub user_id: String,
    pub plan_id: Option<String>,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Plan price copied at purchase time; later plan edits never touch it.
    pub price_snapshot: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(user_id: String, plan: &MembershipPlan, start_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            plan_id: Some(plan.id.clone()),
            status: "ACTIVE".to_string(),
            start_date,
            end_date: start_date + Duration::days(plan.duration_days as i64),
            price_snapshot: plan.price,
            currency: plan.currency.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}
