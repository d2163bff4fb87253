use crate::domain::models::{
    user::User, plan::MembershipPlan, membership::Membership,
    payment::Payment, checkin::Checkin,
    reports::{MethodRevenue, PlanRevenue},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MembershipPlan>, AppError>;
    async fn list(&self) -> Result<Vec<MembershipPlan>, AppError>;
    async fn update(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError>;
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn create(&self, membership: &Membership) -> Result<Membership, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Membership>, AppError>;
    async fn list(&self) -> Result<Vec<Membership>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Membership>, AppError>;
    /// Most-recently-ending ACTIVE membership for a user, if any.
    async fn find_latest_active(&self, user_id: &str) -> Result<Option<Membership>, AppError>;
    async fn update(&self, membership: &Membership) -> Result<Membership, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_by_status(&self, status: &str) -> Result<i64, AppError>;
    async fn count_active_expiring_by(&self, cutoff: DateTime<Utc>) -> Result<i64, AppError>;
    /// Marks every ACTIVE membership whose end date is before `cutoff` as
    /// EXPIRED; returns the number of rows touched.
    async fn expire_all_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;
    async fn find_expiring_candidates(&self, cutoff: DateTime<Utc>) -> Result<Vec<Membership>, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn list(&self) -> Result<Vec<Payment>, AppError>;
    async fn find_paid_since(&self, since: DateTime<Utc>) -> Result<Vec<Payment>, AppError>;
    async fn sum_paid(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Result<f64, AppError>;
    async fn sum_paid_by_method(&self) -> Result<Vec<MethodRevenue>, AppError>;
    async fn sum_paid_by_plan(&self) -> Result<Vec<PlanRevenue>, AppError>;
}

#[async_trait]
pub trait CheckinRepository: Send + Sync {
    async fn create(&self, checkin: &Checkin) -> Result<Checkin, AppError>;
    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, AppError>;
    async fn count_in_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64, AppError>;
    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Checkin>, AppError>;
    async fn find_in_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Checkin>, AppError>;
    async fn find_recent(&self, limit: i64) -> Result<Vec<Checkin>, AppError>;
    async fn find_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Checkin>, AppError>;
}
