use serde::Deserialize;
use chrono::{DateTime, Utc};

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub price: f64,
    pub duration_days: i32,
    pub currency: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub duration_days: Option<i32>,
    pub currency: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateMembershipRequest {
    pub user_id: String,
    pub plan_id: String,
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct UpdateMembershipRequest {
    pub status: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub plan_id: Option<String>,
}

#[derive(Deserialize)]
pub struct RenewMembershipRequest {
    pub extra_days: i64,
}

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub user_id: String,
    pub membership_id: Option<String>,
    pub amount: f64,
    pub currency: Option<String>,
    pub method: String,
    pub status: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct CreateCheckinRequest {
    pub user_id: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Deserialize)]
pub struct TrendQuery {
    pub days: Option<i64>,
}
