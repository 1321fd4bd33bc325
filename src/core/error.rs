use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    /// Any failure reported by the SQLite engine: syntax errors, unknown
    /// tables or columns, wrong number of bound arguments.
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error")]
    Io(#[source] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
