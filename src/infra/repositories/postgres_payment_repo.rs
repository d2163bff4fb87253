use crate::domain::{
    models::payment::Payment,
    models::reports::{MethodRevenue, PlanRevenue},
    ports::PaymentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

pub struct PostgresPaymentRepo {
    pool: PgPool,
}

impl PostgresPaymentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, user_id, membership_id, amount, currency, method, status, paid_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&payment.id).bind(&payment.user_id).bind(&payment.membership_id)
            .bind(payment.amount).bind(&payment.currency).bind(&payment.method)
            .bind(&payment.status).bind(payment.paid_at).bind(payment.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_paid_since(&self, since: DateTime<Utc>) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE status = 'PAID' AND paid_at >= $1 ORDER BY paid_at ASC"
        )
            .bind(since).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn sum_paid(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Result<f64, AppError> {
        let row = match (from, to) {
            (None, None) => {
                sqlx::query("SELECT COALESCE(SUM(amount), 0.0) as total FROM payments WHERE status = 'PAID'")
                    .fetch_one(&self.pool).await
            }
            (Some(from), None) => {
                sqlx::query("SELECT COALESCE(SUM(amount), 0.0) as total FROM payments WHERE status = 'PAID' AND paid_at >= $1")
                    .bind(from).fetch_one(&self.pool).await
            }
            (None, Some(to)) => {
                sqlx::query("SELECT COALESCE(SUM(amount), 0.0) as total FROM payments WHERE status = 'PAID' AND paid_at < $1")
                    .bind(to).fetch_one(&self.pool).await
            }
            (Some(from), Some(to)) => {
                sqlx::query("SELECT COALESCE(SUM(amount), 0.0) as total FROM payments WHERE status = 'PAID' AND paid_at >= $1 AND paid_at < $2")
                    .bind(from).bind(to).fetch_one(&self.pool).await
            }
        }.map_err(AppError::Database)?;
        Ok(row.get::<f64, _>("total"))
    }
    async fn sum_paid_by_method(&self) -> Result<Vec<MethodRevenue>, AppError> {
        sqlx::query_as::<_, MethodRevenue>(
            "SELECT method, COALESCE(SUM(amount), 0.0) as total FROM payments WHERE status = 'PAID' GROUP BY method ORDER BY method ASC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn sum_paid_by_plan(&self) -> Result<Vec<PlanRevenue>, AppError> {
        sqlx::query_as::<_, PlanRevenue>(
            "SELECT COALESCE(p.name, 'No plan') as plan, COALESCE(SUM(pay.amount), 0.0) as total
             FROM payments pay
             LEFT JOIN memberships m ON pay.membership_id = m.id
             LEFT JOIN membership_plans p ON m.plan_id = p.id
             WHERE pay.status = 'PAID'
             GROUP BY COALESCE(p.name, 'No plan')
             ORDER BY total DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
