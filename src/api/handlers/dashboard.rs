use axum::{extract::{Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::NaiveDate;

use crate::state::AppState;
use crate::api::dtos::requests::{HistoryQuery, TrendQuery};
use crate::domain::services::finance::DEFAULT_TREND_DAYS;
use crate::error::AppError;

pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = state.dashboard_service.get_metrics(false).await?;
    Ok(Json(metrics))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = state.dashboard_service.refresh_and_broadcast().await?;
    Ok(Json(metrics))
}

pub async fn daily_trend(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let trend = state.dashboard_service.daily_checkins_trend().await?;
    Ok(Json(trend))
}

pub async fn peak_hours(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let peak = state.dashboard_service.peak_hours().await?;
    Ok(Json(peak))
}

pub async fn activity_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(from), Some(to)) = (params.from, params.to) else {
        return Err(AppError::Validation(
            "Query params \"from\" and \"to\" are required (YYYY-MM-DD)".into(),
        ));
    };

    let from = parse_ymd(&from)?;
    let to = parse_ymd(&to)?;

    let history = state.dashboard_service.activity_history(from, to).await?;
    Ok(Json(history))
}

pub async fn global_performance(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let performance = state.dashboard_service.global_performance().await?;
    Ok(Json(performance))
}

pub async fn finance_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let dashboard = state.finance_service.full_dashboard().await?;
    Ok(Json(dashboard))
}

pub async fn finance_summary(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.finance_service.summary().await?;
    Ok(Json(summary))
}

pub async fn finance_methods(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let methods = state.finance_service.revenue_by_method().await?;
    Ok(Json(methods))
}

pub async fn finance_plans(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let plans = state.finance_service.performance_by_plan().await?;
    Ok(Json(plans))
}

pub async fn finance_trend(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendQuery>,
) -> Result<impl IntoResponse, AppError> {
    let days = params.days.filter(|d| *d > 0).unwrap_or(DEFAULT_TREND_DAYS);
    let trend = state.finance_service.revenue_trend(days).await?;
    Ok(Json(trend))
}

fn parse_ymd(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format. Use YYYY-MM-DD".into()))
}
