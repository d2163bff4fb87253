use crate::domain::{models::checkin::Checkin, ports::CheckinRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteCheckinRepo {
    pool: SqlitePool,
}

impl SqliteCheckinRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckinRepository for SqliteCheckinRepo {
    async fn create(&self, checkin: &Checkin) -> Result<Checkin, AppError> {
        sqlx::query_as::<_, Checkin>(
            "INSERT INTO checkins (id, user_id, membership_id, status, timestamp, notes)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&checkin.id).bind(&checkin.user_id).bind(&checkin.membership_id)
            .bind(&checkin.status).bind(checkin.timestamp).bind(&checkin.notes)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM checkins WHERE timestamp >= ?").bind(since).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
    async fn count_in_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM checkins WHERE timestamp >= ? AND timestamp < ?").bind(from).bind(to).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<Checkin>, AppError> {
        sqlx::query_as::<_, Checkin>("SELECT * FROM checkins WHERE timestamp >= ? ORDER BY timestamp DESC").bind(since).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_in_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Checkin>, AppError> {
        sqlx::query_as::<_, Checkin>("SELECT * FROM checkins WHERE timestamp >= ? AND timestamp < ? ORDER BY timestamp DESC").bind(from).bind(to).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_recent(&self, limit: i64) -> Result<Vec<Checkin>, AppError> {
        sqlx::query_as::<_, Checkin>("SELECT * FROM checkins ORDER BY timestamp DESC LIMIT ?").bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Checkin>, AppError> {
        sqlx::query_as::<_, Checkin>("SELECT * FROM checkins WHERE user_id = ? ORDER BY timestamp DESC LIMIT ?").bind(user_id).bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
