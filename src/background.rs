use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::{interval_at, sleep, Instant};
use tracing::{error, info, warn};

use crate::domain::ports::MembershipRepository;
use crate::domain::services::dashboard::DashboardService;
use crate::realtime::Broadcaster;

#[derive(Clone)]
pub struct SchedulerSettings {
    pub initial_delay: Duration,
    pub tick_interval: Duration,
    pub idle_fallback: Duration,
}

/// Periodic dashboard refresh. With subscribers connected every tick
/// recomputes and broadcasts; with none, refreshes drop to the idle
/// fallback cadence. A failed refresh is logged and never stops the loop.
pub async fn start_dashboard_scheduler(
    dashboard: Arc<DashboardService>,
    broadcaster: Arc<Broadcaster>,
    settings: SchedulerSettings,
) {
    info!("Starting dashboard scheduler...");

    sleep(settings.initial_delay).await;

    // One-shot warmup so the first dashboard consumer never sees an
    // empty cache.
    match dashboard.refresh_and_broadcast().await {
        Ok(_) => info!("Initial dashboard metrics refreshed"),
        Err(e) => error!("Initial dashboard refresh failed: {:?}", e),
    }
    let mut last_idle_refresh = Instant::now();

    let mut ticker = interval_at(Instant::now() + settings.tick_interval, settings.tick_interval);

    loop {
        ticker.tick().await;

        let subscribers = broadcaster.subscriber_count();

        if subscribers == 0 {
            if last_idle_refresh.elapsed() >= settings.idle_fallback {
                warn!("No dashboard clients connected, running fallback refresh");
                if let Err(e) = dashboard.refresh_and_broadcast().await {
                    error!("Fallback dashboard refresh failed: {:?}", e);
                }
                last_idle_refresh = Instant::now();
            }
            continue;
        }

        info!("{} dashboard client(s) connected, refreshing metrics", subscribers);
        if let Err(e) = dashboard.refresh_and_broadcast().await {
            error!("Scheduled dashboard refresh failed: {:?}", e);
        }
    }
}

/// Marks ACTIVE memberships whose end date has passed as EXPIRED. The
/// admission oracle re-checks end dates itself, so a lagging sweep never
/// lets anyone in.
pub async fn start_expiration_sweeper(
    membership_repo: Arc<dyn MembershipRepository>,
    interval: Duration,
) {
    info!("Starting membership expiration sweeper...");

    let mut ticker = interval_at(Instant::now() + interval, interval);

    loop {
        ticker.tick().await;

        match membership_repo.expire_all_before(Utc::now()).await {
            Ok(0) => {}
            Ok(count) => warn!("{} memberships marked as expired", count),
            Err(e) => error!("Membership expiration sweep failed: {:?}", e),
        }
    }
}
