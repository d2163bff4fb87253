use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::checkin::Checkin;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyCount {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyTrend {
    pub trend: Vec<DailyCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourCount {
    pub hour: u32,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PeakHours {
    pub peak_hour: HourCount,
    pub distribution: Vec<HourCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActivityHistory {
    pub range: DateRange,
    pub total: usize,
    pub records: Vec<Checkin>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PerformanceWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PerformancePeriods {
    pub current: PerformanceWindow,
    pub previous: PerformanceWindow,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckinComparison {
    pub current: i64,
    pub previous: i64,
    pub variation_pct: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RevenueComparison {
    pub current: f64,
    pub previous: f64,
    pub variation_pct: f64,
    pub currency: String,
}

/// Week-over-week business indicators: trailing 7 days vs the 7 before.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalPerformance {
    pub period: PerformancePeriods,
    pub checkins: CheckinComparison,
    pub revenue: RevenueComparison,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FinanceSummary {
    pub total_revenue: f64,
    pub daily_revenue: f64,
    pub weekly_revenue: f64,
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RevenuePoint {
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MethodRevenue {
    pub method: String,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PlanRevenue {
    pub plan: String,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FinanceDashboard {
    pub summary: FinanceSummary,
    pub trend: Vec<RevenuePoint>,
    pub by_method: Vec<MethodRevenue>,
    pub by_plan: Vec<PlanRevenue>,
}
