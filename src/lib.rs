//! Ask SQLite how it would execute a statement.
//!
//! [`QueryPlanExplainer`] composes SELECT and UPDATE statements (or takes raw
//! SQL), runs them through `EXPLAIN QUERY PLAN` and returns the `detail`
//! column of every plan row, in the order SQLite reports them. Test suites
//! use it to assert that a query is served by the expected index.

#![allow(clippy::too_many_arguments)]

// Core module with the crate-wide error type
pub mod core;

pub mod config;
pub mod io;

pub use crate::core::error::{Error, Result};
pub use config::QueryPlanConfig;
pub use io::sql::{
    DatabaseConnection, QueryPlanExplainer, QueryPlanRow, SelectStatement, SqlConnection,
    SqlValue, UpdateStatement,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
