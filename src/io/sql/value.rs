use std::fmt;

use rusqlite::types::{ToSql, ToSqlOutput, Value};

/// Value assigned to a column in an UPDATE statement
///
/// `Integer` and `Real` are both rendered as bare numerals when inlined.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(String),
}

impl SqlValue {
    /// Render the value as an inline SQL literal.
    ///
    /// Text is wrapped in single quotes without escaping; embedded quotes
    /// are the caller's responsibility. Use bound placeholders when the
    /// text is not trusted.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(v) => v.to_string(),
            SqlValue::Real(v) => real_literal(*v),
            SqlValue::Boolean(true) => "1".to_string(),
            SqlValue::Boolean(false) => "0".to_string(),
            SqlValue::Text(v) => format!("'{}'", v),
        }
    }
}

/// Render a float as a REAL literal.
///
/// Finite values keep a fractional part or exponent (`1.0`, `1e-30`) so
/// SQLite does not read them as INTEGER. SQLite has no infinity or NaN
/// literal: `9e999` overflows to infinity and NaN is stored as NULL.
fn real_literal(v: f64) -> String {
    if v.is_nan() {
        "NULL".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "9e999" } else { "-9e999" }.to_string()
    } else {
        format!("{:?}", v)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let output = match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlValue::Boolean(v) => ToSqlOutput::Owned(Value::Integer(i64::from(*v))),
            SqlValue::Text(v) => ToSqlOutput::from(v.as_str()),
        };
        Ok(output)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Boolean(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_rendering() {
        assert_eq!(SqlValue::Null.to_literal(), "NULL");
        assert_eq!(SqlValue::Integer(-7).to_literal(), "-7");
        assert_eq!(SqlValue::Real(2.5).to_literal(), "2.5");
        assert_eq!(SqlValue::Boolean(true).to_literal(), "1");
        assert_eq!(SqlValue::Boolean(false).to_literal(), "0");
        assert_eq!(SqlValue::Text("abc".to_string()).to_literal(), "'abc'");
    }

    #[test]
    fn test_real_literal_stays_real() {
        assert_eq!(SqlValue::Real(1.0).to_literal(), "1.0");
        assert_eq!(SqlValue::Real(-3.0).to_literal(), "-3.0");
        assert_eq!(SqlValue::Real(1e-30).to_literal(), "1e-30");
        assert_eq!(SqlValue::Real(f64::INFINITY).to_literal(), "9e999");
        assert_eq!(SqlValue::Real(f64::NEG_INFINITY).to_literal(), "-9e999");
        assert_eq!(SqlValue::Real(f64::NAN).to_literal(), "NULL");
    }

    #[test]
    fn test_real_literals_parse_as_sqlite_reals() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        for v in [1.0, 1e-30, f64::INFINITY, f64::NEG_INFINITY] {
            let sql = format!("SELECT typeof({0}), {0}", SqlValue::Real(v).to_literal());
            let (kind, parsed): (String, f64) = conn
                .query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
                .unwrap();
            assert_eq!(kind, "real", "literal for {}", v);
            assert_eq!(parsed, v);
        }
    }

    #[test]
    fn test_text_literal_is_not_escaped() {
        let value = SqlValue::from("it's");
        assert_eq!(value.to_literal(), "'it's'");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(SqlValue::from(1), SqlValue::Integer(1));
        assert_eq!(SqlValue::from(1_i64), SqlValue::Integer(1));
        assert_eq!(SqlValue::from(0.5), SqlValue::Real(0.5));
        assert_eq!(SqlValue::from(false), SqlValue::Boolean(false));
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".to_string()));
    }

    #[test]
    fn test_sql_value_to_sql() {
        assert_eq!(
            SqlValue::Boolean(true).to_sql().unwrap(),
            ToSqlOutput::Owned(Value::Integer(1))
        );
        assert_eq!(
            SqlValue::Null.to_sql().unwrap(),
            ToSqlOutput::Owned(Value::Null)
        );
        assert!(SqlValue::Text("hello".to_string()).to_sql().is_ok());
    }
}
