use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Point-in-time dashboard aggregate. Lives only in the metrics cache,
/// never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub checkins_today: i64,
    pub active_memberships: i64,
    pub expired_memberships: i64,
    pub expiring_soon: i64,
}
