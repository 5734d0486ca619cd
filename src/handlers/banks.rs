use crate::db::models::{Bank, BranchDetail};
use crate::error::BankdexError;
use crate::router::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BankListQuery {
    /// Substring to match against bank names.
    pub q: Option<String>,
}

/// GET /banks -> all banks, optionally narrowed by `?q=`.
pub async fn list_banks(
    State(state): State<AppState>,
    Query(query): Query<BankListQuery>,
) -> Result<Json<Vec<Bank>>, BankdexError> {
    let q = query.q.as_deref().filter(|s| !s.is_empty());
    let banks = state.storage.list_banks(q).await?;
    Ok(Json(banks))
}

#[derive(Debug, Deserialize)]
pub struct BranchListQuery {
    pub branch: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// GET /banks/{bank_id}/branches -> the bank's branches, filtered by any of
/// `?branch=`, `?city=`, `?state=`. 404 when the bank id is unknown, filters
/// or not.
pub async fn list_branches_for_bank(
    State(state): State<AppState>,
    Path(bank_id): Path<i64>,
    Query(filters): Query<BranchListQuery>,
) -> Result<Json<Vec<BranchDetail>>, BankdexError> {
    if state.storage.bank_by_id(bank_id).await?.is_none() {
        return Err(BankdexError::BankNotFound);
    }

    let branch = filters.branch.as_deref().filter(|s| !s.is_empty());
    let city = filters.city.as_deref().filter(|s| !s.is_empty());
    let region = filters.state.as_deref().filter(|s| !s.is_empty());

    let branches = state
        .storage
        .branches_for_bank(bank_id, branch, city, region)
        .await?;
    Ok(Json(branches))
}
