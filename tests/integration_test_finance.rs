mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::TestApp;
use gym_backend::domain::models::payment::Payment;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &TestApp, uri: &str, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

async fn get(app: &TestApp, uri: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap()
}

async fn seed_user(app: &TestApp, email: &str) -> String {
    let res = post_json(app, "/api/v1/users", json!({"email": email, "name": "Payer"})).await;
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

fn raw_payment(user_id: &str, amount: f64, method: &str, status: &str, paid_at: Option<DateTime<Utc>>) -> Payment {
    Payment {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        membership_id: None,
        amount,
        currency: "MXN".to_string(),
        method: method.to_string(),
        status: status.to_string(),
        paid_at,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_finance_summary_buckets_by_window() {
    let app = TestApp::new().await;
    let payer = seed_user(&app, "summary@gym.test").await;

    // a paid_at just inside today, regardless of what time the test runs
    let today_ts = Utc.from_utc_datetime(
        &Utc::now().date_naive().and_hms_opt(0, 0, 30).unwrap(),
    );

    let seeds = [
        raw_payment(&payer, 100.0, "CASH", "PAID", Some(today_ts)),
        raw_payment(&payer, 200.0, "CARD", "PAID", Some(Utc::now() - Duration::days(3))),
        raw_payment(&payer, 300.0, "CASH", "PAID", Some(Utc::now() - Duration::days(20))),
        // pending money must never count
        raw_payment(&payer, 999.0, "CASH", "PENDING", None),
    ];
    for payment in &seeds {
        app.state.payment_repo.create(payment).await.unwrap();
    }

    let summary = parse_body(get(&app, "/api/v1/dashboard/finance/summary").await).await;
    assert_eq!(summary["total_revenue"], 600.0);
    assert_eq!(summary["daily_revenue"], 100.0);
    assert_eq!(summary["weekly_revenue"], 300.0);
    assert_eq!(summary["currency"], "MXN");
}

#[tokio::test]
async fn test_revenue_grouped_by_method() {
    let app = TestApp::new().await;
    let payer = seed_user(&app, "methods@gym.test").await;

    let now = Utc::now();
    for payment in [
        raw_payment(&payer, 100.0, "CASH", "PAID", Some(now)),
        raw_payment(&payer, 50.0, "CASH", "PAID", Some(now)),
        raw_payment(&payer, 200.0, "CARD", "PAID", Some(now)),
        raw_payment(&payer, 400.0, "TRANSFER", "FAILED", None),
    ] {
        app.state.payment_repo.create(&payment).await.unwrap();
    }

    let methods = parse_body(get(&app, "/api/v1/dashboard/finance/methods").await).await;
    let rows = methods.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["method"], "CARD");
    assert_eq!(rows[0]["total"], 200.0);
    assert_eq!(rows[1]["method"], "CASH");
    assert_eq!(rows[1]["total"], 150.0);
}

#[tokio::test]
async fn test_revenue_grouped_by_plan_with_orphan_bucket() {
    let app = TestApp::new().await;
    let payer = seed_user(&app, "plans@gym.test").await;

    let plan = parse_body(post_json(&app, "/api/v1/plans", json!({
        "name": "Gold", "price": 300.0, "duration_days": 30
    })).await).await;
    let membership = parse_body(post_json(&app, "/api/v1/memberships", json!({
        "user_id": payer, "plan_id": plan["id"].as_str().unwrap()
    })).await).await;

    let mut linked = raw_payment(&payer, 300.0, "CARD", "PAID", Some(Utc::now()));
    linked.membership_id = Some(membership["id"].as_str().unwrap().to_string());
    app.state.payment_repo.create(&linked).await.unwrap();

    // a paid drop-in with no membership behind it
    app.state.payment_repo.create(&raw_payment(&payer, 50.0, "CASH", "PAID", Some(Utc::now()))).await.unwrap();

    let plans = parse_body(get(&app, "/api/v1/dashboard/finance/plans").await).await;
    let rows = plans.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["plan"], "Gold");
    assert_eq!(rows[0]["total"], 300.0);
    assert_eq!(rows[1]["plan"], "No plan");
    assert_eq!(rows[1]["total"], 50.0);
}

#[tokio::test]
async fn test_revenue_trend_is_zero_filled() {
    let app = TestApp::new().await;
    let payer = seed_user(&app, "trend@gym.test").await;

    let now = Utc::now();
    app.state.payment_repo.create(&raw_payment(&payer, 100.0, "CASH", "PAID", Some(now))).await.unwrap();
    app.state.payment_repo.create(&raw_payment(&payer, 40.0, "CARD", "PAID", Some(now - Duration::days(1)))).await.unwrap();

    let trend = parse_body(get(&app, "/api/v1/dashboard/finance/trend?days=2").await).await;
    let points = trend.as_array().unwrap();
    assert_eq!(points.len(), 3);

    let today = now.date_naive();
    assert_eq!(points[0]["date"], (today - Duration::days(2)).format("%Y-%m-%d").to_string().as_str());
    assert_eq!(points[0]["total"], 0.0);
    assert_eq!(points[1]["total"], 40.0);
    assert_eq!(points[2]["total"], 100.0);
}

#[tokio::test]
async fn test_full_finance_dashboard_combines_sections() {
    let app = TestApp::new().await;
    let payer = seed_user(&app, "full@gym.test").await;
    app.state.payment_repo.create(&raw_payment(&payer, 250.0, "STRIPE", "PAID", Some(Utc::now()))).await.unwrap();

    let res = get(&app, "/api/v1/dashboard/finance").await;
    assert_eq!(res.status(), StatusCode::OK);
    let dashboard = parse_body(res).await;

    assert_eq!(dashboard["summary"]["total_revenue"], 250.0);
    assert_eq!(dashboard["trend"].as_array().unwrap().len(), 15);
    assert_eq!(dashboard["by_method"][0]["method"], "STRIPE");
    assert_eq!(dashboard["by_plan"][0]["plan"], "No plan");
}

#[tokio::test]
async fn test_payment_api_validates_input() {
    let app = TestApp::new().await;
    let payer = seed_user(&app, "validate@gym.test").await;

    let res = post_json(&app, "/api/v1/payments", json!({
        "user_id": payer, "amount": -5.0, "method": "CASH"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = post_json(&app, "/api/v1/payments", json!({
        "user_id": payer, "amount": 100.0, "method": "BARTER"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = post_json(&app, "/api/v1/payments", json!({
        "user_id": payer, "amount": 100.0, "method": "CASH", "status": "PAID"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let paid = parse_body(res).await;
    assert_eq!(paid["status"], "PAID");
    assert!(paid["paid_at"].is_string());
}
