use crate::db::models::BranchDetail;
use crate::error::BankdexError;
use crate::router::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

/// GET /branches/{ifsc} -> the branch with that code plus its owning bank.
pub async fn branch_by_ifsc(
    State(state): State<AppState>,
    Path(ifsc): Path<String>,
) -> Result<Json<BranchDetail>, BankdexError> {
    let branch = state
        .storage
        .branch_by_ifsc(&ifsc)
        .await?
        .ok_or(BankdexError::BranchNotFound)?;
    Ok(Json(branch))
}
