use crate::db::BankStorage;
use crate::handlers;
use axum::{
    Json, Router,
    response::{Html, Redirect},
    routing::get,
};
use serde_json::json;

#[derive(Clone)]
pub struct AppState {
    pub storage: BankStorage,
}

impl AppState {
    pub fn new(storage: BankStorage) -> Self {
        Self { storage }
    }
}

pub fn bankdex_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/docs", get(docs))
        .route("/healthz", get(healthz))
        .route("/banks", get(handlers::banks::list_banks))
        .route(
            "/banks/{bank_id}/branches",
            get(handlers::banks::list_branches_for_bank),
        )
        .route("/branches/{ifsc}", get(handlers::branches::branch_by_ifsc))
        .with_state(state)
}

async fn root() -> Redirect {
    Redirect::temporary("/docs")
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn docs() -> Html<&'static str> {
    Html(API_REFERENCE)
}

const API_REFERENCE: &str = r#"<!DOCTYPE html>
<html>
<head><title>bankdex API</title></head>
<body>
<h1>bankdex</h1>
<p>Read-only lookup over banks and their branches.</p>
<ul>
<li><code>GET /banks?q=</code> &mdash; all banks, optionally filtered by name substring</li>
<li><code>GET /branches/{ifsc}</code> &mdash; one branch by IFSC code, with its owning bank</li>
<li><code>GET /banks/{bank_id}/branches?branch=&amp;city=&amp;state=</code> &mdash; a bank's branches, filterable</li>
<li><code>GET /healthz</code> &mdash; liveness</li>
</ul>
</body>
</html>
"#;
