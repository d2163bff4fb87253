use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::models::metrics::MetricsSnapshot;
use crate::domain::models::reports::{
    ActivityHistory, CheckinComparison, DailyCount, DailyTrend, DateRange,
    GlobalPerformance, HourCount, PeakHours, PerformancePeriods, PerformanceWindow,
    RevenueComparison,
};
use crate::domain::ports::{CheckinRepository, MembershipRepository, PaymentRepository};
use crate::domain::services::calendar::{local_midnight, start_of_local_day};
use crate::error::AppError;
use crate::realtime::{Broadcaster, DashboardPayload, RealtimeEvent};

const EXPIRING_SOON_DAYS: i64 = 3;
const TREND_DAYS: i64 = 7;

struct CacheEntry {
    stored_at: Instant,
    snapshot: MetricsSnapshot,
}

/// Dashboard aggregates behind a single TTL-bounded cache entry, plus the
/// on-demand reports that are never cached.
pub struct DashboardService {
    checkin_repo: Arc<dyn CheckinRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    broadcaster: Arc<Broadcaster>,
    tz: Tz,
    ttl: StdDuration,
    cache: RwLock<Option<CacheEntry>>,
}

impl DashboardService {
    pub fn new(
        checkin_repo: Arc<dyn CheckinRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        broadcaster: Arc<Broadcaster>,
        tz: Tz,
        ttl: StdDuration,
    ) -> Self {
        Self {
            checkin_repo,
            membership_repo,
            payment_repo,
            broadcaster,
            tz,
            ttl,
            cache: RwLock::new(None),
        }
    }

    /// An unexpired entry is returned unchanged without touching the
    /// persistence layer unless `force_refresh` is set.
    pub async fn get_metrics(&self, force_refresh: bool) -> Result<MetricsSnapshot, AppError> {
        if !force_refresh {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.as_ref() {
                if entry.stored_at.elapsed() < self.ttl {
                    debug!("Dashboard metrics served from cache");
                    return Ok(entry.snapshot.clone());
                }
            }
        }

        debug!("Recomputing dashboard metrics (cache miss or forced refresh)");
        let snapshot = self.compute_snapshot().await?;

        // Installed only after a fully successful recompute; a failed
        // recompute leaves the previous entry untouched.
        *self.cache.write().await = Some(CacheEntry {
            stored_at: Instant::now(),
            snapshot: snapshot.clone(),
        });

        Ok(snapshot)
    }

    async fn compute_snapshot(&self) -> Result<MetricsSnapshot, AppError> {
        let now = Utc::now();
        let start_of_day = start_of_local_day(now, self.tz);
        let expiring_cutoff = now + Duration::days(EXPIRING_SOON_DAYS);

        let (checkins_today, active_memberships, expired_memberships, expiring_soon) = tokio::try_join!(
            self.checkin_repo.count_since(start_of_day),
            self.membership_repo.count_by_status("ACTIVE"),
            self.membership_repo.count_by_status("EXPIRED"),
            self.membership_repo.count_active_expiring_by(expiring_cutoff),
        )?;

        Ok(MetricsSnapshot {
            timestamp: now,
            checkins_today,
            active_memberships,
            expired_memberships,
            expiring_soon,
        })
    }

    /// Forces a recompute and pushes the fresh snapshot to every connected
    /// dashboard client.
    pub async fn refresh_and_broadcast(&self) -> Result<MetricsSnapshot, AppError> {
        let latest = self.get_metrics(true).await?;
        self.broadcaster.publish(RealtimeEvent::DashboardUpdate(DashboardPayload::Snapshot(latest.clone())));
        debug!("dashboard_update broadcast emitted");
        Ok(latest)
    }

    /// Check-ins per calendar day for the trailing week, zero-filled,
    /// oldest first.
    pub async fn daily_checkins_trend(&self) -> Result<DailyTrend, AppError> {
        let today = Utc::now().with_timezone(&self.tz).date_naive();
        let window_start = local_midnight(today - Duration::days(TREND_DAYS - 1), self.tz);

        let checkins = self.checkin_repo.find_since(window_start).await?;
        let dates = checkins.iter().map(|c| c.timestamp.with_timezone(&self.tz).date_naive());

        Ok(DailyTrend { trend: bucket_daily(dates, today) })
    }

    /// Today's check-ins bucketed by local hour, with the busiest bucket.
    pub async fn peak_hours(&self) -> Result<PeakHours, AppError> {
        let start = start_of_local_day(Utc::now(), self.tz);

        let checkins = self.checkin_repo.find_since(start).await?;
        let hours = checkins.iter().map(|c| c.timestamp.with_timezone(&self.tz).hour());

        let (peak_hour, distribution) = bucket_hours(hours);
        Ok(PeakHours { peak_hour, distribution })
    }

    /// Check-ins between two calendar dates, both inclusive, newest first.
    /// Date strings are validated at the API boundary before this runs.
    pub async fn activity_history(&self, from: NaiveDate, to: NaiveDate) -> Result<ActivityHistory, AppError> {
        let start = local_midnight(from, self.tz);
        let end = local_midnight(to + Duration::days(1), self.tz);

        let records = self.checkin_repo.find_in_range(start, end).await?;

        Ok(ActivityHistory {
            range: DateRange {
                from: from.format("%Y-%m-%d").to_string(),
                to: to.format("%Y-%m-%d").to_string(),
            },
            total: records.len(),
            records,
        })
    }

    /// Trailing 7 days vs the 7 days before: check-in counts and PAID
    /// revenue, each with a percentage variation.
    pub async fn global_performance(&self) -> Result<GlobalPerformance, AppError> {
        let now = Utc::now();
        let today = now.with_timezone(&self.tz).date_naive();
        let week_start = local_midnight(today - Duration::days(6), self.tz);
        let prev_week_start = week_start - Duration::days(7);

        let (checkins_curr, checkins_prev, revenue_curr, revenue_prev) = tokio::try_join!(
            self.checkin_repo.count_since(week_start),
            self.checkin_repo.count_in_range(prev_week_start, week_start),
            self.payment_repo.sum_paid(Some(week_start), None),
            self.payment_repo.sum_paid(Some(prev_week_start), Some(week_start)),
        )?;

        Ok(GlobalPerformance {
            period: PerformancePeriods {
                current: PerformanceWindow { from: week_start, to: now },
                previous: PerformanceWindow { from: prev_week_start, to: week_start },
            },
            checkins: CheckinComparison {
                current: checkins_curr,
                previous: checkins_prev,
                variation_pct: variation_pct(checkins_prev as f64, checkins_curr as f64),
            },
            revenue: RevenueComparison {
                current: revenue_curr,
                previous: revenue_prev,
                variation_pct: variation_pct(revenue_prev, revenue_curr),
                currency: "MXN".to_string(),
            },
        })
    }
}

fn bucket_daily(dates: impl Iterator<Item = NaiveDate>, today: NaiveDate) -> Vec<DailyCount> {
    let mut counts = [0i64; TREND_DAYS as usize];

    for date in dates {
        let days_ago = (today - date).num_days();
        if (0..TREND_DAYS).contains(&days_ago) {
            counts[(TREND_DAYS - 1 - days_ago) as usize] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let date = today - Duration::days(TREND_DAYS - 1 - i as i64);
            DailyCount {
                date: date.format("%Y-%m-%d").to_string(),
                count,
            }
        })
        .collect()
}

fn bucket_hours(hours: impl Iterator<Item = u32>) -> (HourCount, Vec<HourCount>) {
    let mut counts = [0i64; 24];

    for hour in hours {
        if let Some(slot) = counts.get_mut(hour as usize) {
            *slot += 1;
        }
    }

    let distribution: Vec<HourCount> = counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourCount { hour: hour as u32, count })
        .collect();

    // Ties break to the lowest hour.
    let mut peak = distribution[0].clone();
    for entry in &distribution[1..] {
        if entry.count > peak.count {
            peak = entry.clone();
        }
    }

    (peak, distribution)
}

fn variation_pct(prev: f64, curr: f64) -> f64 {
    if prev == 0.0 && curr == 0.0 {
        return 0.0;
    }
    if prev == 0.0 {
        return 100.0;
    }
    let pct = (curr - prev) / prev * 100.0;
    (pct * 100.0).round() / 100.0
}
