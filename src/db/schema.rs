//! SQL DDL for initializing the bank/branch store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `banks.id` supplied by the source dataset, never autogenerated
/// - `branches.ifsc` TEXT PRIMARY KEY, globally unique branch code
/// - cascade delete from a bank to its branches
/// - single-column indexes on the searchable fields, plus the two composite
///   indexes covering the common filter combinations
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS banks (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_banks_name ON banks(name);

CREATE TABLE IF NOT EXISTS branches (
    ifsc TEXT PRIMARY KEY,
    bank_id INTEGER NOT NULL REFERENCES banks(id) ON DELETE CASCADE,
    branch TEXT NULL,
    address TEXT NULL,
    city TEXT NULL,
    district TEXT NULL,
    state TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_branches_bank_id ON branches(bank_id);
CREATE INDEX IF NOT EXISTS idx_branches_branch ON branches(branch);
CREATE INDEX IF NOT EXISTS idx_branches_city ON branches(city);
CREATE INDEX IF NOT EXISTS idx_branches_district ON branches(district);
CREATE INDEX IF NOT EXISTS idx_branches_state ON branches(state);
CREATE INDEX IF NOT EXISTS idx_branches_bank_branch ON branches(bank_id, branch);
CREATE INDEX IF NOT EXISTS idx_branches_city_state ON branches(city, state);
"#;
