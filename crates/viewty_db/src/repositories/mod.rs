// --- File: crates/viewty_db/src/repositories/mod.rs ---
//! Repositories backed by the shared connection pool.

pub mod visit_store_sql;

#[cfg(test)]
mod visit_store_sql_test;

pub use visit_store_sql::SqlVisitStore;
