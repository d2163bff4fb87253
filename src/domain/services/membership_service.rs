use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::models::membership::Membership;
use crate::domain::ports::{MembershipRepository, PlanRepository, UserRepository};
use crate::error::AppError;

const MEMBERSHIP_STATUSES: [&str; 4] = ["ACTIVE", "EXPIRED", "FROZEN", "CANCELLED"];

pub struct MembershipUpdate {
    pub status: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub plan_id: Option<String>,
}

/// Membership lifecycle: purchase with a plan-price snapshot, manual
/// status transitions, renewal, and the periodic expiration sweep.
pub struct MembershipService {
    membership_repo: Arc<dyn MembershipRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl MembershipService {
    pub fn new(
        membership_repo: Arc<dyn MembershipRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self { membership_repo, plan_repo, user_repo }
    }

    pub async fn create(
        &self,
        user_id: &str,
        plan_id: &str,
        start_date: Option<DateTime<Utc>>,
    ) -> Result<Membership, AppError> {
        let user = self.user_repo.find_by_id(user_id).await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let plan = self.plan_repo.find_by_id(plan_id).await?
            .ok_or_else(|| AppError::NotFound("Membership plan not found".to_string()))?;

        let membership = Membership::new(user.id, &plan, start_date.unwrap_or_else(Utc::now));
        let created = self.membership_repo.create(&membership).await?;

        info!("Membership created: {} ({})", created.id, plan.name);
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Membership, AppError> {
        self.membership_repo.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Membership>, AppError> {
        self.membership_repo.list().await
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Membership>, AppError> {
        self.membership_repo.list_by_user(user_id).await
    }

    pub async fn update(&self, id: &str, update: MembershipUpdate) -> Result<Membership, AppError> {
        let mut membership = self.find_by_id(id).await?;

        if let Some(status) = update.status {
            if !MEMBERSHIP_STATUSES.contains(&status.as_str()) {
                return Err(AppError::Validation(format!("Unknown membership status: {}", status)));
            }
            membership.status = status;
        }

        if let Some(plan_id) = update.plan_id {
            let plan = self.plan_repo.find_by_id(&plan_id).await?
                .ok_or_else(|| AppError::NotFound("Membership plan not found".to_string()))?;

            // A plan change restarts the duration from now and re-snapshots
            // price and currency.
            membership.plan_id = Some(plan.id.clone());
            membership.end_date = update.end_date
                .unwrap_or_else(|| Utc::now() + Duration::days(plan.duration_days as i64));
            membership.price_snapshot = plan.price;
            membership.currency = plan.currency.clone();
        } else if let Some(end_date) = update.end_date {
            membership.end_date = end_date;
        }

        membership.updated_at = Utc::now();
        let updated = self.membership_repo.update(&membership).await?;

        info!("Membership updated: {}", updated.id);
        Ok(updated)
    }

    pub async fn renew(&self, id: &str, extra_days: i64) -> Result<Membership, AppError> {
        if extra_days <= 0 {
            return Err(AppError::Validation("extra_days must be a positive number".to_string()));
        }

        let mut membership = self.find_by_id(id).await?;
        membership.end_date += Duration::days(extra_days);
        membership.status = "ACTIVE".to_string();
        membership.updated_at = Utc::now();

        let renewed = self.membership_repo.update(&membership).await?;
        info!("Membership renewed: {} (+{} days)", renewed.id, extra_days);
        Ok(renewed)
    }

    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.find_by_id(id).await?;
        self.membership_repo.delete(id).await?;
        warn!("Membership deleted: {}", id);
        Ok(())
    }

    /// Batch expiration by date comparison. Admission never waits for this
    /// sweep; the oracle re-checks end dates on its own.
    pub async fn sweep_expired(&self) -> Result<u64, AppError> {
        let updated = self.membership_repo.expire_all_before(Utc::now()).await?;
        if updated > 0 {
            warn!("{} memberships marked as expired", updated);
        }
        Ok(updated)
    }

    pub async fn preview_expiring(&self) -> Result<Vec<Membership>, AppError> {
        self.membership_repo.find_expiring_candidates(Utc::now()).await
    }
}
