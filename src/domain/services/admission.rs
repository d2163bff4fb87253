use std::sync::Arc;
use chrono::Utc;

use crate::domain::models::membership::Membership;
use crate::domain::ports::MembershipRepository;
use crate::error::AppError;

#[derive(Debug)]
pub enum AdmissionDecision {
    Allowed(Membership),
    Denied,
}

/// Decides whether a user may enter the facility. Pure read: one
/// membership lookup, no side effects.
pub struct AdmissionService {
    membership_repo: Arc<dyn MembershipRepository>,
}

impl AdmissionService {
    pub fn new(membership_repo: Arc<dyn MembershipRepository>) -> Self {
        Self { membership_repo }
    }

    /// Takes the most-recently-ending ACTIVE membership and re-checks its
    /// end date against the wall clock. The stored status flag alone is
    /// not sufficient: the expiration sweep lags behind real time, so a
    /// membership can still read ACTIVE after its end date has passed.
    pub async fn is_admissible(&self, user_id: &str) -> Result<AdmissionDecision, AppError> {
        let candidate = self.membership_repo.find_latest_active(user_id).await?;

        match candidate {
            Some(membership) if membership.end_date > Utc::now() => {
                Ok(AdmissionDecision::Allowed(membership))
            }
            _ => Ok(AdmissionDecision::Denied),
        }
    }
}
