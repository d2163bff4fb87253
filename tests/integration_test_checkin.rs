mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use gym_backend::domain::models::membership::Membership;
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
    let res = post_json(app, "/api/v1/users", json!({"email": email, "name": "Test Member"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn seed_membership(app: &TestApp, user_id: &str) -> String {
    let plan = parse_body(post_json(app, "/api/v1/plans", json!({
        "name": "Monthly", "price": 500.0, "duration_days": 30
    })).await).await;
    let res = post_json(app, "/api/v1/memberships", json!({
        "user_id": user_id,
        "plan_id": plan["id"].as_str().unwrap()
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

fn raw_membership(user_id: &str, status: &str, end_in: Duration) -> Membership {
    let now = Utc::now();
    Membership {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        plan_id: None,
        status: status.to_string(),
        start_date: now - Duration::days(30),
        end_date: now + end_in,
        price_snapshot: 0.0,
        currency: "MXN".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_checkin_allowed_with_active_membership() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "active@gym.test").await;
    let membership_id = seed_membership(&app, &user_id).await;

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id, "notes": "morning session"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let checkin = parse_body(res).await;
    assert_eq!(checkin["status"], "ALLOWED");
    assert_eq!(checkin["user_id"], user_id.as_str());
    assert_eq!(checkin["membership_id"], membership_id.as_str());
    assert_eq!(checkin["notes"], "morning session");
}

#[tokio::test]
async fn test_checkin_denied_without_membership_writes_denied_row() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "nomember@gym.test").await;

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("active membership"));

    // denial must still be durably recorded
    let ledger = parse_body(get(&app, &format!("/api/v1/checkins/user/{}", user_id)).await).await;
    let rows = ledger.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "DENIED");
    assert!(rows[0]["membership_id"].is_null());
    assert!(rows[0]["notes"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn test_stale_active_status_is_not_trusted() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "stale@gym.test").await;

    // ACTIVE on paper, but the end date has already passed and no sweep
    // has run yet
    let stale = raw_membership(&user_id, "ACTIVE", Duration::seconds(-1));
    app.state.membership_repo.create(&stale).await.unwrap();

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let ledger = parse_body(get(&app, &format!("/api/v1/checkins/user/{}", user_id)).await).await;
    assert_eq!(ledger.as_array().unwrap()[0]["status"], "DENIED");
}

#[tokio::test]
async fn test_admissibility_flips_when_end_date_passes() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "boundary@gym.test").await;

    let expiring = raw_membership(&user_id, "ACTIVE", Duration::milliseconds(1500));
    app.state.membership_repo.create(&expiring).await.unwrap();

    let before = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
    assert_eq!(before.status(), StatusCode::OK);
    assert_eq!(parse_body(before).await["status"], "ALLOWED");

    tokio::time::sleep(std::time::Duration::from_millis(1700)).await;

    let after = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
    assert_eq!(after.status(), StatusCode::FORBIDDEN);

    // exactly one ledger row per attempt, status matching the decision
    let ledger = parse_body(get(&app, &format!("/api/v1/checkins/user/{}", user_id)).await).await;
    let rows = ledger.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["status"], "DENIED");
    assert_eq!(rows[1]["status"], "ALLOWED");
}

#[tokio::test]
async fn test_oracle_picks_most_recently_ending_active_membership() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "duplicates@gym.test").await;

    let short = raw_membership(&user_id, "ACTIVE", Duration::seconds(-5));
    let long = raw_membership(&user_id, "ACTIVE", Duration::days(10));
    app.state.membership_repo.create(&short).await.unwrap();
    app.state.membership_repo.create(&long).await.unwrap();

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["membership_id"], long.id.as_str());
}

#[tokio::test]
async fn test_frozen_membership_is_not_admissible() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "frozen@gym.test").await;

    let frozen = raw_membership(&user_id, "FROZEN", Duration::days(10));
    app.state.membership_repo.create(&frozen).await.unwrap();

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_checkin_unknown_user_is_not_found() {
    let app = TestApp::new().await;

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": Uuid::new_v4().to_string()})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // no ledger row for an unresolvable user
    let all = parse_body(get(&app, "/api/v1/checkins").await).await;
    assert_eq!(all.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_blank_user_id_rejected_at_boundary() {
    let app = TestApp::new().await;

    let res = post_json(&app, "/api/v1/checkins", json!({"user_id": "   "})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeated_checkins_are_not_deduplicated() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "regular@gym.test").await;
    seed_membership(&app, &user_id).await;

    for _ in 0..3 {
        let res = post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let ledger = parse_body(get(&app, &format!("/api/v1/checkins/user/{}", user_id)).await).await;
    assert_eq!(ledger.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_today_listing_contains_fresh_checkins() {
    let app = TestApp::new().await;
    let user_id = seed_user(&app, "today@gym.test").await;
    seed_membership(&app, &user_id).await;

    post_json(&app, "/api/v1/checkins", json!({"user_id": user_id})).await;

    let today = parse_body(get(&app, "/api/v1/checkins/today").await).await;
    let rows = today.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], user_id.as_str());
}
