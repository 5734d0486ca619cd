use crate::db::models::{Bank, BranchDetail};
use crate::db::schema::SQLITE_INIT;
use crate::error::BankdexError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the SQLite database behind `database_url`.
/// Foreign keys are enforced on every connection so the branch -> bank
/// reference and cascade delete hold.
pub async fn connect(database_url: &str) -> Result<SqlitePool, BankdexError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct BankStorage {
    pool: SqlitePool,
}

impl BankStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BankdexError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn bank_by_id(&self, id: i64) -> Result<Option<Bank>, BankdexError> {
        let bank = sqlx::query_as::<_, Bank>("SELECT id, name FROM banks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(bank)
    }

    /// All banks ordered by name, optionally narrowed to names containing
    /// `name_filter` (case-insensitive; SQLite LIKE folds ASCII case).
    pub async fn list_banks(&self, name_filter: Option<&str>) -> Result<Vec<Bank>, BankdexError> {
        let banks = sqlx::query_as::<_, Bank>(
            r#"SELECT id, name FROM banks
               WHERE ?1 IS NULL OR name LIKE '%' || ?1 || '%'
               ORDER BY name"#,
        )
        .bind(name_filter)
        .fetch_all(&self.pool)
        .await?;
        Ok(banks)
    }

    /// Exact primary-key lookup, joined with the owning bank.
    pub async fn branch_by_ifsc(&self, ifsc: &str) -> Result<Option<BranchDetail>, BankdexError> {
        let row = sqlx::query(
            r#"SELECT b.ifsc, b.branch, b.address, b.city, b.district, b.state,
                      k.id AS bank_id, k.name AS bank_name
               FROM branches b
               JOIN banks k ON k.id = b.bank_id
               WHERE b.ifsc = ?"#,
        )
        .bind(ifsc)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_detail).transpose()
    }

    /// Branches of one bank ordered by branch name. Each filter, when present,
    /// is a case-insensitive substring match; multiple filters AND together.
    /// Existence of the bank itself is the caller's check.
    pub async fn branches_for_bank(
        &self,
        bank_id: i64,
        branch: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
    ) -> Result<Vec<BranchDetail>, BankdexError> {
        let rows = sqlx::query(
            r#"SELECT b.ifsc, b.branch, b.address, b.city, b.district, b.state,
                      k.id AS bank_id, k.name AS bank_name
               FROM branches b
               JOIN banks k ON k.id = b.bank_id
               WHERE b.bank_id = ?1
                 AND (?2 IS NULL OR b.branch LIKE '%' || ?2 || '%')
                 AND (?3 IS NULL OR b.city LIKE '%' || ?3 || '%')
                 AND (?4 IS NULL OR b.state LIKE '%' || ?4 || '%')
               ORDER BY b.branch"#,
        )
        .bind(bank_id)
        .bind(branch)
        .bind(city)
        .bind(state)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_detail).collect()
    }

    fn row_to_detail(row: SqliteRow) -> Result<BranchDetail, BankdexError> {
        Ok(BranchDetail {
            ifsc: row.try_get("ifsc")?,
            branch: row.try_get("branch")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            district: row.try_get("district")?,
            state: row.try_get("state")?,
            bank: Bank {
                id: row.try_get("bank_id")?,
                name: row.try_get("bank_name")?,
            },
        })
    }
}
