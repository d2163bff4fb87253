use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    CheckinRepository, MembershipRepository, PaymentRepository,
    PlanRepository, UserRepository,
};
use crate::domain::services::admission::AdmissionService;
use crate::domain::services::checkin_service::CheckinService;
use crate::domain::services::dashboard::DashboardService;
use crate::domain::services::finance::FinanceService;
use crate::domain::services::membership_service::MembershipService;
use crate::realtime::Broadcaster;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub plan_repo: Arc<dyn PlanRepository>,
    pub membership_repo: Arc<dyn MembershipRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub checkin_repo: Arc<dyn CheckinRepository>,
    pub admission_service: Arc<AdmissionService>,
    pub checkin_service: Arc<CheckinService>,
    pub membership_service: Arc<MembershipService>,
    pub dashboard_service: Arc<DashboardService>,
    pub finance_service: Arc<FinanceService>,
    pub broadcaster: Arc<Broadcaster>,
}
