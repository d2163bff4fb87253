use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

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
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_user_repo::PostgresUserRepo, postgres_plan_repo::PostgresPlanRepo,
    postgres_membership_repo::PostgresMembershipRepo, postgres_payment_repo::PostgresPaymentRepo,
    postgres_checkin_repo::PostgresCheckinRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_plan_repo::SqlitePlanRepo,
    sqlite_membership_repo::SqliteMembershipRepo, sqlite_payment_repo::SqlitePaymentRepo,
    sqlite_checkin_repo::SqliteCheckinRepo,
};

const BROADCAST_CAPACITY: usize = 64;

/// Wires services on top of a set of repositories. Shared by both database
/// backends and by the test harness.
pub fn build_state(
    config: &Config,
    user_repo: Arc<dyn UserRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    checkin_repo: Arc<dyn CheckinRepository>,
) -> AppState {
    let broadcaster = Arc::new(Broadcaster::new(BROADCAST_CAPACITY));

    let admission_service = Arc::new(AdmissionService::new(membership_repo.clone()));
    let checkin_service = Arc::new(CheckinService::new(
        user_repo.clone(),
        checkin_repo.clone(),
        admission_service.clone(),
        broadcaster.clone(),
        config.timezone,
    ));
    let membership_service = Arc::new(MembershipService::new(
        membership_repo.clone(),
        plan_repo.clone(),
        user_repo.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        checkin_repo.clone(),
        membership_repo.clone(),
        payment_repo.clone(),
        broadcaster.clone(),
        config.timezone,
        Duration::from_secs(config.metrics_ttl_secs),
    ));
    let finance_service = Arc::new(FinanceService::new(payment_repo.clone(), config.timezone));

    AppState {
        config: config.clone(),
        user_repo,
        plan_repo,
        membership_repo,
        payment_repo,
        checkin_repo,
        admission_service,
        checkin_service,
        membership_service,
        dashboard_service,
        finance_service,
        broadcaster,
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        build_state(
            config,
            Arc::new(PostgresUserRepo::new(pool.clone())),
            Arc::new(PostgresPlanRepo::new(pool.clone())),
            Arc::new(PostgresMembershipRepo::new(pool.clone())),
            Arc::new(PostgresPaymentRepo::new(pool.clone())),
            Arc::new(PostgresCheckinRepo::new(pool.clone())),
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        build_state(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqlitePlanRepo::new(pool.clone())),
            Arc::new(SqliteMembershipRepo::new(pool.clone())),
            Arc::new(SqlitePaymentRepo::new(pool.clone())),
            Arc::new(SqliteCheckinRepo::new(pool.clone())),
        )
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
