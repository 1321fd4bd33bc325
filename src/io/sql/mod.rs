//! SQLite query plan support
//!
//! - `connection`: opening SQLite connections from a URL
//! - `value`: values assigned by UPDATE statements
//! - `statement`: SELECT and UPDATE statement builders
//! - `explainer`: running `EXPLAIN QUERY PLAN` and decoding its rows
//!
//! # Basic Usage
//!
//! ```no_run
//! use queryplan::io::sql::{QueryPlanExplainer, SqlConnection, SqlValue};
//!
//! let conn = SqlConnection::from_url("sqlite:app.db").unwrap().open().unwrap();
//! let explainer = QueryPlanExplainer::new(&conn);
//!
//! let plan = explainer
//!     .explain_update("users", &[("active", SqlValue::from(true))], Some("id = ?"), Some(&["7"][..]))
//!     .unwrap();
//! for row in plan {
//!     println!("{}", row);
//! }
//! ```

pub mod connection;
pub mod explainer;
pub mod statement;
pub mod value;

pub use connection::{DatabaseConnection, SqlConnection};
pub use explainer::{QueryPlanExplainer, QueryPlanRow, DETAIL_COLUMN, EXPLAIN_QUERY_PLAN_PREFIX};
pub use statement::{SelectStatement, UpdateStatement};
pub use value::SqlValue;
