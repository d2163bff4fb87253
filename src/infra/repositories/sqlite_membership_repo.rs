use crate::domain::{models::membership::Membership, ports::MembershipRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteMembershipRepo {
    pool: SqlitePool,
}

impl SqliteMembershipRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for SqliteMembershipRepo {
    async fn create(&self, membership: &Membership) -> Result<Membership, AppError> {
        sqlx::query_as::<_, Membership>(
            "INSERT INTO memberships (id, user_id, plan_id, status, start_date, end_date, price_snapshot, currency, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&membership.id).bind(&membership.user_id).bind(&membership.plan_id).bind(&membership.status)
            .bind(membership.start_date).bind(membership.end_date).bind(membership.price_snapshot)
            .bind(&membership.currency).bind(membership.created_at).bind(membership.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Membership>, AppError> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Membership>, AppError> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Membership>, AppError> {
        sqlx::query_as::<_, Membership>("SELECT * FROM memberships WHERE user_id = ? ORDER BY created_at DESC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_latest_active(&self, user_id: &str) -> Result<Option<Membership>, AppError> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE user_id = ? AND status = 'ACTIVE' ORDER BY end_date DESC LIMIT 1"
        )
            .bind(user_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, membership: &Membership) -> Result<Membership, AppError> {
        sqlx::query_as::<_, Membership>(
            "UPDATE memberships SET plan_id = ?, status = ?, start_date = ?, end_date = ?, price_snapshot = ?, currency = ?, updated_at = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&membership.plan_id).bind(&membership.status).bind(membership.start_date)
            .bind(membership.end_date).bind(membership.price_snapshot).bind(&membership.currency)
            .bind(membership.updated_at).bind(&membership.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Membership not found".into())); }
        Ok(())
    }
    async fn count_by_status(&self, status: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM memberships WHERE status = ?").bind(status).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
    async fn count_active_expiring_by(&self, cutoff: DateTime<Utc>) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM memberships WHERE status = 'ACTIVE' AND end_date <= ?").bind(cutoff).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
    async fn expire_all_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE memberships SET status = 'EXPIRED', updated_at = ? WHERE status = 'ACTIVE' AND end_date < ?"
        )
            .bind(Utc::now()).bind(cutoff)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
    async fn find_expiring_candidates(&self, cutoff: DateTime<Utc>) -> Result<Vec<Membership>, AppError> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM memberships WHERE status = 'ACTIVE' AND end_date < ? ORDER BY end_date ASC"
        )
            .bind(cutoff).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
