//! SELECT and UPDATE statement builders
//!
//! Builders only concatenate text. Clause fragments are inserted verbatim,
//! so `?` placeholders inside them are bound by whoever executes the SQL.

use super::value::SqlValue;

/// Append ` KEYWORD fragment` when the fragment is present and non-empty.
///
/// Whitespace-only fragments are still appended.
fn push_clause(sql: &mut String, keyword: &str, fragment: Option<&str>) {
    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        sql.push(' ');
        sql.push_str(keyword);
        sql.push(' ');
        sql.push_str(fragment);
    }
}

/// SELECT statement composed from its clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    /// Table to select from
    pub table: String,
    /// Result columns; empty means `*`
    pub columns: Vec<String>,
    /// WHERE clause fragment
    pub filter: Option<String>,
    /// GROUP BY clause fragment
    pub group_by: Option<String>,
    /// HAVING clause fragment
    pub having: Option<String>,
    /// ORDER BY clause fragment
    pub order_by: Option<String>,
    /// LIMIT clause fragment
    pub limit: Option<String>,
}

impl SelectStatement {
    /// Create a `SELECT * FROM table` statement
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    /// Select specific columns
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Set WHERE clause
    pub fn filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// Set GROUP BY clause
    pub fn group_by(mut self, group_by: &str) -> Self {
        self.group_by = Some(group_by.to_string());
        self
    }

    /// Set HAVING clause
    pub fn having(mut self, having: &str) -> Self {
        self.having = Some(having.to_string());
        self
    }

    /// Set ORDER BY clause
    pub fn order_by(mut self, order_by: &str) -> Self {
        self.order_by = Some(order_by.to_string());
        self
    }

    /// Set LIMIT clause
    pub fn limit(mut self, limit: &str) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Build the SQL text.
    ///
    /// Clauses always appear in the order WHERE, GROUP BY, HAVING,
    /// ORDER BY, LIMIT; absent or empty ones are left out.
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        push_clause(&mut sql, "WHERE", self.filter.as_deref());
        push_clause(&mut sql, "GROUP BY", self.group_by.as_deref());
        push_clause(&mut sql, "HAVING", self.having.as_deref());
        push_clause(&mut sql, "ORDER BY", self.order_by.as_deref());
        push_clause(&mut sql, "LIMIT", self.limit.as_deref());

        sql
    }
}

/// UPDATE statement with ordered column assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStatement {
    /// Table to update
    pub table: String,
    /// Column assignments, rendered in this order
    pub values: Vec<(String, SqlValue)>,
    /// WHERE clause fragment
    pub filter: Option<String>,
}

impl UpdateStatement {
    /// Create an UPDATE statement with no assignments yet
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Self::default()
        }
    }

    /// Append a column assignment
    pub fn set<V: Into<SqlValue>>(mut self, column: &str, value: V) -> Self {
        self.values.push((column.to_string(), value.into()));
        self
    }

    /// Set WHERE clause
    pub fn filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// Build the SQL text with every value inlined as a literal.
    pub fn to_sql(&self) -> String {
        self.render(|value| value.to_literal())
    }

    /// Build the SQL text with a `?` placeholder for every value.
    ///
    /// The values returned by [`UpdateStatement::bound_values`] must be bound
    /// ahead of any filter arguments.
    pub fn to_sql_with_placeholders(&self) -> String {
        self.render(|_| "?".to_string())
    }

    /// Assigned values in SET clause order
    pub fn bound_values(&self) -> Vec<SqlValue> {
        self.values.iter().map(|(_, value)| value.clone()).collect()
    }

    fn render<F>(&self, render_value: F) -> String
    where
        F: Fn(&SqlValue) -> String,
    {
        let assignments: Vec<String> = self
            .values
            .iter()
            .map(|(column, value)| format!("{} = {}", column, render_value(value)))
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, assignments.join(", "));
        push_clause(&mut sql, "WHERE", self.filter.as_deref());
        sql
    }
}
