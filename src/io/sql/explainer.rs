use std::fmt;

use rusqlite::{params_from_iter, Connection};
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

use super::statement::{SelectStatement, UpdateStatement};
use super::value::SqlValue;

/// Keyword sequence that turns a statement into a query plan request
pub const EXPLAIN_QUERY_PLAN_PREFIX: &str = "EXPLAIN QUERY PLAN ";

/// Column of the EXPLAIN QUERY PLAN output holding the plan text
pub const DETAIL_COLUMN: &str = "detail";

/// One row of `EXPLAIN QUERY PLAN` output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryPlanRow {
    /// How SQLite plans to execute one step of the statement,
    /// e.g. `SEARCH TableA USING INTEGER PRIMARY KEY (rowid=?)`
    pub detail: String,
}

impl QueryPlanRow {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for QueryPlanRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Explains how SQLite would execute SELECT and UPDATE statements
///
/// Every call is a single blocking round trip on the borrowed connection.
/// Engine failures are returned unchanged as [`crate::Error::Sql`].
///
/// # Example
///
/// ```
/// use queryplan::{QueryPlanExplainer, QueryPlanRow};
/// use rusqlite::Connection;
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute_batch("CREATE TABLE t (a INTEGER PRIMARY KEY, b TEXT)").unwrap();
///
/// let explainer = QueryPlanExplainer::new(&conn);
/// let plan = explainer
///     .explain_select("t", None, Some("a = ?"), Some(&["1"][..]), None, None, None, None)
///     .unwrap();
/// assert_eq!(plan, vec![QueryPlanRow::new("SEARCH t USING INTEGER PRIMARY KEY (rowid=?)")]);
/// ```
pub struct QueryPlanExplainer<'conn> {
    connection: &'conn Connection,
}

impl<'conn> QueryPlanExplainer<'conn> {
    pub fn new(connection: &'conn Connection) -> Self {
        Self { connection }
    }

    /// Connection the explain statements run on
    pub fn connection(&self) -> &'conn Connection {
        self.connection
    }

    /// Explain an arbitrary SQL statement.
    ///
    /// The statement is passed through untouched apart from the
    /// `EXPLAIN QUERY PLAN` prefix, and no arguments are bound.
    pub fn explain_raw_statement(&self, sql: &str) -> Result<Vec<QueryPlanRow>> {
        self.execute_explain(sql, &[])
    }

    /// Explain the SELECT statement composed from the given clauses.
    ///
    /// `None` and empty clauses are omitted; `None` or empty `columns`
    /// selects `*`. `filter_args` are bound to the `?` placeholders of the
    /// whole statement in order.
    pub fn explain_select(
        &self,
        table: &str,
        columns: Option<&[&str]>,
        filter: Option<&str>,
        filter_args: Option<&[&str]>,
        group_by: Option<&str>,
        having: Option<&str>,
        order_by: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Vec<QueryPlanRow>> {
        let statement = SelectStatement {
            table: table.to_string(),
            columns: columns
                .unwrap_or_default()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            filter: filter.map(str::to_string),
            group_by: group_by.map(str::to_string),
            having: having.map(str::to_string),
            order_by: order_by.map(str::to_string),
            limit: limit.map(str::to_string),
        };

        self.explain_select_statement(&statement, filter_args.unwrap_or_default())
    }

    /// Explain a pre-built SELECT statement.
    pub fn explain_select_statement(
        &self,
        statement: &SelectStatement,
        filter_args: &[&str],
    ) -> Result<Vec<QueryPlanRow>> {
        self.execute_explain(&statement.to_sql(), &text_args(filter_args))
    }

    /// Explain the UPDATE statement assigning `column_values` in order.
    ///
    /// Values are inlined as literals; text is single-quoted without
    /// escaping. Use [`QueryPlanExplainer::explain_update_bound`] for text
    /// that may contain quotes.
    pub fn explain_update(
        &self,
        table: &str,
        column_values: &[(&str, SqlValue)],
        filter: Option<&str>,
        filter_args: Option<&[&str]>,
    ) -> Result<Vec<QueryPlanRow>> {
        let statement = update_statement(table, column_values, filter);
        self.explain_update_statement(&statement, filter_args.unwrap_or_default())
    }

    /// Explain a pre-built UPDATE statement with its values inlined.
    pub fn explain_update_statement(
        &self,
        statement: &UpdateStatement,
        filter_args: &[&str],
    ) -> Result<Vec<QueryPlanRow>> {
        self.execute_explain(&statement.to_sql(), &text_args(filter_args))
    }

    /// Explain the UPDATE statement with every value bound as a parameter
    /// instead of inlined.
    pub fn explain_update_bound(
        &self,
        table: &str,
        column_values: &[(&str, SqlValue)],
        filter: Option<&str>,
        filter_args: Option<&[&str]>,
    ) -> Result<Vec<QueryPlanRow>> {
        let statement = update_statement(table, column_values, filter);

        let mut args = statement.bound_values();
        args.extend(text_args(filter_args.unwrap_or_default()));

        self.execute_explain(&statement.to_sql_with_placeholders(), &args)
    }

    fn execute_explain(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<QueryPlanRow>> {
        let explain_sql = format!("{}{}", EXPLAIN_QUERY_PLAN_PREFIX, sql);
        log::debug!(
            "Explaining query plan ({} bound args): {}",
            args.len(),
            explain_sql
        );

        // The statement and its rows are finalized on drop, whichever way
        // this function exits
        let mut stmt = self.connection.prepare(&explain_sql)?;
        let mut rows = stmt.query(params_from_iter(args.iter()))?;

        let mut plan = Vec::new();
        while let Some(row) = rows.next()? {
            let detail: String = row.get(DETAIL_COLUMN)?;
            log::trace!("Query plan row: {}", detail);
            plan.push(QueryPlanRow { detail });
        }

        log::debug!("Query plan has {} rows", plan.len());
        Ok(plan)
    }
}

fn update_statement(
    table: &str,
    column_values: &[(&str, SqlValue)],
    filter: Option<&str>,
) -> UpdateStatement {
    UpdateStatement {
        table: table.to_string(),
        values: column_values
            .iter()
            .map(|(column, value)| (column.to_string(), value.clone()))
            .collect(),
        filter: filter.map(str::to_string),
    }
}

fn text_args(args: &[&str]) -> Vec<SqlValue> {
    args.iter().map(|arg| SqlValue::from(*arg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Items (Id INTEGER PRIMARY KEY, Name TEXT NOT NULL);
             CREATE INDEX Name_on_Items ON Items (Name);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_query_plan_row_equality_and_display() {
        let row = QueryPlanRow::new("SCAN Items");
        assert_eq!(row, QueryPlanRow::new("SCAN Items".to_string()));
        assert_ne!(row, QueryPlanRow::new("SCAN Other"));
        assert_eq!(row.to_string(), "SCAN Items");
    }

    #[test]
    fn test_explain_primary_key_lookup() {
        let conn = test_connection();
        let explainer = QueryPlanExplainer::new(&conn);

        let plan = explainer
            .explain_raw_statement("SELECT Name FROM Items WHERE Id = 3")
            .unwrap();

        assert_eq!(
            plan,
            vec![QueryPlanRow::new(
                "SEARCH Items USING INTEGER PRIMARY KEY (rowid=?)"
            )]
        );
    }

    #[test]
    fn test_statement_without_plan_rows() {
        let conn = test_connection();
        let explainer = QueryPlanExplainer::new(&conn);

        // Transaction control statements have no plan
        let plan = explainer.explain_raw_statement("BEGIN").unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_engine_errors_propagate() {
        let conn = test_connection();
        let explainer = QueryPlanExplainer::new(&conn);

        let err = explainer
            .explain_raw_statement("SELECT * FROM Missing")
            .unwrap_err();
        assert!(matches!(err, Error::Sql(_)));

        let err = explainer
            .explain_raw_statement("SELEC * FROM Items")
            .unwrap_err();
        assert!(matches!(err, Error::Sql(_)));
    }

    #[test]
    fn test_argument_count_mismatch_is_reported() {
        let conn = test_connection();
        let explainer = QueryPlanExplainer::new(&conn);

        let result = explainer.explain_select(
            "Items",
            None,
            Some("Id = ? AND Name = ?"),
            Some(&["1"][..]),
            None,
            None,
            None,
            None,
        );
        assert!(matches!(result, Err(Error::Sql(_))));
    }

    #[test]
    fn test_connection_usable_after_failure() {
        let conn = test_connection();
        let explainer = QueryPlanExplainer::new(&conn);

        assert!(explainer.explain_raw_statement("SELECT nope FROM Items").is_err());
        let plan = explainer
            .explain_raw_statement("SELECT * FROM Items WHERE Id = 1")
            .unwrap();
        assert_eq!(plan.len(), 1);
    }
}
