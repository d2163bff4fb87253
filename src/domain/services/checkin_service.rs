use std::sync::Arc;
use chrono::Utc;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::domain::models::checkin::Checkin;
use crate::domain::ports::{CheckinRepository, UserRepository};
use crate::domain::services::admission::{AdmissionDecision, AdmissionService};
use crate::domain::services::calendar::start_of_local_day;
use crate::error::AppError;
use crate::realtime::{Broadcaster, DashboardPayload, RealtimeEvent};

const DENIAL_NOTE: &str = "No active membership or it has expired";

/// Append-only ledger of admission decisions. Every attempt leaves exactly
/// one row, allowed or denied.
pub struct CheckinService {
    user_repo: Arc<dyn UserRepository>,
    checkin_repo: Arc<dyn CheckinRepository>,
    admission: Arc<AdmissionService>,
    broadcaster: Arc<Broadcaster>,
    tz: Tz,
}

impl CheckinService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        checkin_repo: Arc<dyn CheckinRepository>,
        admission: Arc<AdmissionService>,
        broadcaster: Arc<Broadcaster>,
        tz: Tz,
    ) -> Self {
        Self { user_repo, checkin_repo, admission, broadcaster, tz }
    }

    pub async fn record_admission(&self, user_id: &str, notes: Option<String>) -> Result<Checkin, AppError> {
        let user = self.user_repo.find_by_id(user_id).await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        match self.admission.is_admissible(&user.id).await? {
            AdmissionDecision::Allowed(membership) => {
                let checkin = self.checkin_repo
                    .create(&Checkin::allowed(user.id.clone(), membership.id.clone(), notes))
                    .await?;

                info!("Check-in allowed for {} (membership {})", user.email, membership.id);

                self.broadcaster.publish(RealtimeEvent::CheckinRecorded(checkin.clone()));
                self.broadcaster.publish(RealtimeEvent::DashboardUpdate(DashboardPayload::Checkin(checkin.clone())));

                Ok(checkin)
            }
            AdmissionDecision::Denied => {
                // The denial row is written and broadcast before the error
                // surfaces, so the attempt stays observable even though the
                // caller receives a rejection.
                let denied = self.checkin_repo
                    .create(&Checkin::denied(user.id.clone(), DENIAL_NOTE))
                    .await?;

                self.broadcaster.publish(RealtimeEvent::CheckinRecorded(denied.clone()));
                self.broadcaster.publish(RealtimeEvent::DashboardUpdate(DashboardPayload::Checkin(denied)));

                warn!("Check-in denied for {} ({}): no active membership", user.email, user.id);

                Err(AppError::MembershipInactive(
                    "User has no active membership or it has expired".to_string(),
                ))
            }
        }
    }

    /// Latest check-ins across all users, capped at 100.
    pub async fn find_recent(&self) -> Result<Vec<Checkin>, AppError> {
        self.checkin_repo.find_recent(100).await
    }

    pub async fn find_today(&self) -> Result<Vec<Checkin>, AppError> {
        let start = start_of_local_day(Utc::now(), self.tz);
        self.checkin_repo.find_since(start).await
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Checkin>, AppError> {
        self.checkin_repo.find_by_user(user_id, 50).await
    }
}
