use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use bankdex::db::{self, BankStorage};
use bankdex::router::{AppState, bankdex_router};

/// Router over a throwaway on-disk store seeded with one bank and one branch.
async fn seeded_app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "bankdex-api-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let pool = db::connect(&database_url)
        .await
        .expect("failed to open sqlite store");
    let storage = BankStorage::new(pool.clone());
    storage.init_schema().await.expect("schema init failed");

    sqlx::query("INSERT INTO banks (id, name) VALUES (?, ?)")
        .bind(123i64)
        .bind("Test Bank")
        .execute(&pool)
        .await
        .expect("failed to seed bank");
    sqlx::query(
        r#"INSERT INTO branches (ifsc, bank_id, branch, address, city, district, state)
           VALUES (?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind("TEST0000001")
    .bind(123i64)
    .bind("Main")
    .bind("123 Test Street")
    .bind("TestCity")
    .bind("TestDistrict")
    .bind("TestState")
    .execute(&pool)
    .await
    .expect("failed to seed branch");

    let app = bankdex_router(AppState::new(storage));
    (app, temp_path)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body was not JSON")
    };
    (status, value)
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let (app, temp_path) = seeded_app("healthz").await;

    let (status, body) = get_json(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let (app, temp_path) = seeded_app("root").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("redirect without location header");
    assert_eq!(location, "/docs");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn list_banks_returns_seeded_bank() {
    let (app, temp_path) = seeded_app("banks").await;

    let (status, body) = get_json(&app, "/banks").await;
    assert_eq!(status, StatusCode::OK);
    let banks = body.as_array().expect("expected a JSON array");
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0]["id"], 123);
    assert_eq!(banks[0]["name"], "Test Bank");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn bank_name_filter_matches_substring_case_insensitively() {
    let (app, temp_path) = seeded_app("banks-filter").await;

    let pool = {
        // Reuse the same store file through a second pool handle.
        let url = format!("sqlite:{}", temp_path.display());
        db::connect(&url).await.expect("failed to reopen store")
    };
    for (id, name) in [(1i64, "STATE BANK OF INDIA"), (39i64, "HDFC BANK")] {
        sqlx::query("INSERT INTO banks (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(&pool)
            .await
            .expect("failed to seed bank");
    }

    let (status, body) = get_json(&app, "/banks?q=state").await;
    assert_eq!(status, StatusCode::OK);
    let banks = body.as_array().expect("expected a JSON array");
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0]["name"], "STATE BANK OF INDIA");

    // All three match "bank" regardless of case, ordered by name.
    let (status, body) = get_json(&app, "/banks?q=BaNk").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|b| b["name"].as_str().expect("name was not a string"))
        .collect();
    assert_eq!(names, vec!["HDFC BANK", "STATE BANK OF INDIA", "Test Bank"]);

    // Empty filter behaves as no filter.
    let (status, body) = get_json(&app, "/banks?q=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("expected a JSON array").len(), 3);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn branch_lookup_embeds_owning_bank() {
    let (app, temp_path) = seeded_app("branch").await;

    let (status, body) = get_json(&app, "/branches/TEST0000001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ifsc"], "TEST0000001");
    assert_eq!(body["branch"], "Main");
    assert_eq!(body["city"], "TestCity");
    assert_eq!(body["bank"]["id"], 123);
    assert_eq!(body["bank"]["name"], "Test Bank");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn unknown_ifsc_returns_not_found() {
    let (app, temp_path) = seeded_app("branch-404").await;

    let (status, body) = get_json(&app, "/branches/NOPE0000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Branch not found");

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn bank_branches_listing_and_filters() {
    let (app, temp_path) = seeded_app("bank-branches").await;

    let (status, body) = get_json(&app, "/banks/123/branches").await;
    assert_eq!(status, StatusCode::OK);
    let branches = body.as_array().expect("expected a JSON array");
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0]["ifsc"], "TEST0000001");
    assert_eq!(branches[0]["bank"]["name"], "Test Bank");

    // Matching filters keep the row; a non-matching one empties the list.
    let (status, body) = get_json(&app, "/banks/123/branches?city=testcity&state=TestState").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("expected a JSON array").len(), 1);

    let (status, body) = get_json(&app, "/banks/123/branches?branch=Main&city=Elsewhere").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("expected a JSON array").is_empty());

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn unknown_bank_returns_not_found_even_with_filters() {
    let (app, temp_path) = seeded_app("bank-404").await;

    let (status, body) = get_json(&app, "/banks/999/branches").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Bank not found");

    let (status, _) = get_json(&app, "/banks/999/branches?city=TestCity").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn nullable_branch_fields_serialize_as_null() {
    let (app, temp_path) = seeded_app("nulls").await;

    let pool = {
        let url = format!("sqlite:{}", temp_path.display());
        db::connect(&url).await.expect("failed to reopen store")
    };
    sqlx::query("INSERT INTO branches (ifsc, bank_id) VALUES (?, ?)")
        .bind("TEST0000002")
        .bind(123i64)
        .execute(&pool)
        .await
        .expect("failed to seed bare branch");

    let (status, body) = get_json(&app, "/branches/TEST0000002").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["branch"].is_null());
    assert!(body["address"].is_null());
    assert_eq!(body["bank"]["id"], 123);

    let _ = fs::remove_file(&temp_path);
}
