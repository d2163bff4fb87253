use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, user, plan, membership, payment, checkin, dashboard, realtime};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Users
        .route("/api/v1/users", post(user::create_user).get(user::list_users))
        .route("/api/v1/users/{user_id}", get(user::get_user).put(user::update_user).delete(user::delete_user))
        .route("/api/v1/users/{user_id}/memberships", get(membership::list_user_memberships))

        // Plans
        .route("/api/v1/plans", post(plan::create_plan).get(plan::list_plans))
        .route("/api/v1/plans/{plan_id}", get(plan::get_plan).put(plan::update_plan))

        // Memberships
        .route("/api/v1/memberships", post(membership::create_membership).get(membership::list_memberships))
        .route("/api/v1/memberships/expired/sweep", post(membership::sweep_expired))
        .route("/api/v1/memberships/expired/preview", get(membership::preview_expiring))
        .route("/api/v1/memberships/{membership_id}", get(membership::get_membership).put(membership::update_membership).delete(membership::delete_membership))
        .route("/api/v1/memberships/{membership_id}/renew", post(membership::renew_membership))

        // Payments
        .route("/api/v1/payments", post(payment::create_payment).get(payment::list_payments))

        // Check-ins
        .route("/api/v1/checkins", post(checkin::create_checkin).get(checkin::list_checkins))
        .route("/api/v1/checkins/today", get(checkin::today_checkins))
        .route("/api/v1/checkins/user/{user_id}", get(checkin::user_checkins))

        // Dashboard
        .route("/api/v1/dashboard/metrics", get(dashboard::get_metrics))
        .route("/api/v1/dashboard/refresh", get(dashboard::refresh))
        .route("/api/v1/dashboard/checkins/daily", get(dashboard::daily_trend))
        .route("/api/v1/dashboard/checkins/peak-hour", get(dashboard::peak_hours))
        .route("/api/v1/dashboard/activity/history", get(dashboard::activity_history))
        .route("/api/v1/dashboard/performance/global", get(dashboard::global_performance))

        // Finance
        .route("/api/v1/dashboard/finance", get(dashboard::finance_dashboard))
        .route("/api/v1/dashboard/finance/summary", get(dashboard::finance_summary))
        .route("/api/v1/dashboard/finance/methods", get(dashboard::finance_methods))
        .route("/api/v1/dashboard/finance/plans", get(dashboard::finance_plans))
        .route("/api/v1/dashboard/finance/trend", get(dashboard::finance_trend))

        // Realtime dashboard feed
        .route("/realtime", get(realtime::realtime_ws))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
