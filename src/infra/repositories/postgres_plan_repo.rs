use crate::domain::{models::plan::MembershipPlan, ports::PlanRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPlanRepo {
    pool: PgPool,
}

impl PostgresPlanRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PostgresPlanRepo {
    async fn create(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError> {
        sqlx::query_as::<_, MembershipPlan>(
            "INSERT INTO membership_plans (id, name, price, duration_days, currency, active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&plan.id).bind(&plan.name).bind(plan.price).bind(plan.duration_days)
            .bind(&plan.currency).bind(plan.active).bind(plan.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<MembershipPlan>, AppError> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<MembershipPlan>, AppError> {
        sqlx::query_as::<_, MembershipPlan>("SELECT * FROM membership_plans ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, plan: &MembershipPlan) -> Result<MembershipPlan, AppError> {
        sqlx::query_as::<_, MembershipPlan>(
            "UPDATE membership_plans SET name = $1, price = $2, duration_days = $3, currency = $4, active = $5
             WHERE id = $6
             RETURNING *"
        )
            .bind(&plan.name).bind(plan.price).bind(plan.duration_days)
            .bind(&plan.currency).bind(plan.active).bind(&plan.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
