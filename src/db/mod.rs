//! Database module: models and schema for the bank/branch store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and API response shapes
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool construction and the query layer

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Bank, BranchDetail};
pub use schema::SQLITE_INIT;
pub use sqlite::{BankStorage, SqlitePool, connect};
