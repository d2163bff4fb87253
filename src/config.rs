use std::env;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub timezone: Tz, // gym-local timezone; day boundaries and hour buckets use it
    pub metrics_ttl_secs: u64,
    pub dashboard_initial_delay_secs: u64,
    pub dashboard_tick_secs: u64,
    pub dashboard_idle_fallback_secs: u64,
    pub expiration_sweep_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            timezone: env::var("GYM_TIMEZONE")
                .unwrap_or_else(|_| "UTC".to_string())
                .parse()
                .expect("GYM_TIMEZONE must be a valid IANA timezone"),
            metrics_ttl_secs: env_u64("METRICS_TTL_SECS", 30),
            dashboard_initial_delay_secs: env_u64("DASHBOARD_INITIAL_DELAY_SECS", 10),
            dashboard_tick_secs: env_u64("DASHBOARD_TICK_SECS", 60),
            dashboard_idle_fallback_secs: env_u64("DASHBOARD_IDLE_FALLBACK_SECS", 600),
            expiration_sweep_secs: env_u64("EXPIRATION_SWEEP_SECS", 600),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
