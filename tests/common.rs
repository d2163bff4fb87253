use gym_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::build_state,
    infra::repositories::{
        sqlite_user_repo::SqliteUserRepo,
        sqlite_plan_repo::SqlitePlanRepo,
        sqlite_membership_repo::SqliteMembershipRepo,
        sqlite_payment_repo::SqlitePaymentRepo,
        sqlite_checkin_repo::SqliteCheckinRepo,
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut config = Config {
            database_url: db_url,
            port: 0,
            timezone: chrono_tz::UTC,
            metrics_ttl_secs: 30,
            dashboard_initial_delay_secs: 0,
            dashboard_tick_secs: 60,
            dashboard_idle_fallback_secs: 600,
            expiration_sweep_secs: 600,
        };
        adjust(&mut config);

        let state = Arc::new(build_state(
            &config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqlitePlanRepo::new(pool.clone())),
            Arc::new(SqliteMembershipRepo::new(pool.clone())),
            Arc::new(SqlitePaymentRepo::new(pool.clone())),
            Arc::new(SqliteCheckinRepo::new(pool.clone())),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
