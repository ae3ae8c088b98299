// --- File: crates/viewty_db/src/lib.rs ---
//! Database integration for Viewty
//!
//! This crate provides a SQLite-backed connection pool and the SQL
//! implementation of the visit store, using SQLx as the underlying
//! database library.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use viewty_config::AppConfig;
//! use viewty_db::{DbClient, SqlVisitStore};
//!
//! async fn setup_store() -> Result<SqlVisitStore, Box<dyn std::error::Error>> {
//!     let config = Arc::new(AppConfig::default());
//!     let client = DbClient::new(&config).await?;
//!     let store = SqlVisitStore::new(&client);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::SqlVisitStore;
