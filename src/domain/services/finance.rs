use std::sync::Arc;

use chrono::{Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::domain::models::reports::{FinanceDashboard, FinanceSummary, MethodRevenue, PlanRevenue, RevenuePoint};
use crate::domain::ports::PaymentRepository;
use crate::domain::services::calendar::{local_midnight, start_of_local_day};
use crate::error::AppError;

pub const DEFAULT_TREND_DAYS: i64 = 14;

/// Revenue analytics over the payment ledger. Read-only; only PAID
/// payments count toward any figure.
pub struct FinanceService {
    payment_repo: Arc<dyn PaymentRepository>,
    tz: Tz,
}

impl FinanceService {
    pub fn new(payment_repo: Arc<dyn PaymentRepository>, tz: Tz) -> Self {
        Self { payment_repo, tz }
    }

    pub async fn summary(&self) -> Result<FinanceSummary, AppError> {
        let now = Utc::now();
        let start_of_day = start_of_local_day(now, self.tz);
        let seven_days_ago = now - Duration::days(7);

        let (total_revenue, daily_revenue, weekly_revenue) = tokio::try_join!(
            self.payment_repo.sum_paid(None, None),
            self.payment_repo.sum_paid(Some(start_of_day), None),
            self.payment_repo.sum_paid(Some(seven_days_ago), None),
        )?;

        let summary = FinanceSummary {
            total_revenue,
            daily_revenue,
            weekly_revenue,
            currency: "MXN".to_string(),
        };
        debug!("Finance summary computed: {:?}", summary);
        Ok(summary)
    }

    /// Daily PAID totals for the last `days` days, zero-filled, oldest
    /// first. Returns `days + 1` points, today included.
    pub async fn revenue_trend(&self, days: i64) -> Result<Vec<RevenuePoint>, AppError> {
        let today = Utc::now().with_timezone(&self.tz).date_naive();
        let window_start = local_midnight(today - Duration::days(days), self.tz);

        let payments = self.payment_repo.find_paid_since(window_start).await?;

        let mut points: Vec<RevenuePoint> = (0..=days)
            .map(|i| RevenuePoint {
                date: (today - Duration::days(days - i)).format("%Y-%m-%d").to_string(),
                total: 0.0,
            })
            .collect();

        for payment in payments {
            let Some(paid_at) = payment.paid_at else { continue };
            let days_ago = (today - paid_at.with_timezone(&self.tz).date_naive()).num_days();
            if (0..=days).contains(&days_ago) {
                points[(days - days_ago) as usize].total += payment.amount;
            }
        }

        debug!("Revenue trend over {} days: {} points", days, points.len());
        Ok(points)
    }

    pub async fn revenue_by_method(&self) -> Result<Vec<MethodRevenue>, AppError> {
        self.payment_repo.sum_paid_by_method().await
    }

    pub async fn performance_by_plan(&self) -> Result<Vec<PlanRevenue>, AppError> {
        self.payment_repo.sum_paid_by_plan().await
    }

    pub async fn full_dashboard(&self) -> Result<FinanceDashboard, AppError> {
        let (summary, trend, by_method, by_plan) = tokio::try_join!(
            self.summary(),
            self.revenue_trend(DEFAULT_TREND_DAYS),
            self.revenue_by_method(),
            self.performance_by_plan(),
        )?;

        Ok(FinanceDashboard { summary, trend, by_method, by_plan })
    }
}
