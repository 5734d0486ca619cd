//! One-time bulk load of the bank/branch dataset from a CSV source.
//!
//! The loader writes through a caller-owned connection and never commits;
//! the caller batches schema creation + load + commit so a failed bootstrap
//! rolls back wholesale.

use crate::error::BankdexError;
use serde::Deserialize;
use sqlx::SqliteConnection;
use std::collections::HashSet;
use std::path::Path;

/// One row of the source file. Empty fields deserialize to `None`.
#[derive(Debug, Deserialize)]
struct SourceRecord {
    bank_id: Option<i64>,
    bank_name: Option<String>,
    ifsc: String,
    branch: Option<String>,
    address: Option<String>,
    city: Option<String>,
    district: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Both tables already had rows; nothing was touched.
    Skipped,
    Loaded { banks: usize, branches: usize },
}

/// Populate the store from `source` unless it already holds data.
///
/// A store with zero banks or zero branches counts as empty, so an
/// inconsistent partial state is reloaded rather than trusted. Each distinct
/// bank id is inserted at most once (first row's name wins) and each ifsc at
/// most once.
pub async fn load_if_needed(
    conn: &mut SqliteConnection,
    source: &Path,
) -> Result<IngestOutcome, BankdexError> {
    if !source.exists() {
        return Err(BankdexError::MissingSource(source.to_path_buf()));
    }

    if !store_is_empty(conn).await? {
        return Ok(IngestOutcome::Skipped);
    }

    // Preload ids already present (empty on first run, but keeps reruns idempotent).
    let existing: Vec<(i64,)> = sqlx::query_as("SELECT id FROM banks")
        .fetch_all(&mut *conn)
        .await?;
    let mut seen_bank_ids: HashSet<i64> = existing.into_iter().map(|(id,)| id).collect();

    let mut banks = 0usize;
    let mut branches = 0usize;

    let mut reader = csv::Reader::from_path(source)?;
    for record in reader.deserialize::<SourceRecord>() {
        let record = record?;
        let Some(bank_id) = record.bank_id else {
            continue;
        };

        if seen_bank_ids.insert(bank_id) {
            sqlx::query("INSERT INTO banks (id, name) VALUES (?, ?)")
                .bind(bank_id)
                .bind(record.bank_name.unwrap_or_default())
                .execute(&mut *conn)
                .await?;
            banks += 1;
        }

        let present: Option<(String,)> = sqlx::query_as("SELECT ifsc FROM branches WHERE ifsc = ?")
            .bind(&record.ifsc)
            .fetch_optional(&mut *conn)
            .await?;
        if present.is_none() {
            sqlx::query(
                r#"INSERT INTO branches (ifsc, bank_id, branch, address, city, district, state)
                   VALUES (?, ?, ?, ?, ?, ?, ?)"#,
            )
            .bind(&record.ifsc)
            .bind(bank_id)
            .bind(record.branch)
            .bind(record.address)
            .bind(record.city)
            .bind(record.district)
            .bind(record.state)
            .execute(&mut *conn)
            .await?;
            branches += 1;
        }
    }

    Ok(IngestOutcome::Loaded { banks, branches })
}

/// Zero banks OR zero branches counts as empty.
async fn store_is_empty(conn: &mut SqliteConnection) -> Result<bool, BankdexError> {
    let (bank_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banks")
        .fetch_one(&mut *conn)
        .await?;
    let (branch_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM branches")
        .fetch_one(&mut *conn)
        .await?;
    Ok(bank_count == 0 || branch_count == 0)
}
