pub mod sql;

// Re-export commonly used types
pub use sql::{QueryPlanExplainer, QueryPlanRow, SqlConnection, SqlValue};
