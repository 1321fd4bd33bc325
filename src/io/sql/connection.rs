use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::core::error::{Error, Result};

/// Where a SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConnection {
    /// Private in-memory database
    Memory,
    /// SQLite file-based database
    File(PathBuf),
}

/// SQLite connection settings parsed from a URL
#[derive(Debug, Clone)]
pub struct SqlConnection {
    connection_type: DatabaseConnection,
    read_only: bool,
    busy_timeout: Duration,
}

impl SqlConnection {
    /// Default time to wait on a locked database
    pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create new database connection settings from URL
    ///
    /// Accepted forms: `sqlite::memory:`, `:memory:`, `sqlite:<path>`,
    /// `sqlite://<path>` and bare paths ending in `.db`, `.sqlite` or
    /// `.sqlite3`.
    pub fn from_url(url: &str) -> Result<Self> {
        let connection_type = parse_url(url)?;
        Ok(Self {
            connection_type,
            read_only: false,
            busy_timeout: Self::DEFAULT_BUSY_TIMEOUT,
        })
    }

    /// Open the database without write access
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set how long to wait for a lock held by another connection
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Get the connection type
    pub fn connection_type(&self) -> &DatabaseConnection {
        &self.connection_type
    }

    /// Whether the connection opens without write access
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Open a new SQLite connection
    pub fn open(&self) -> Result<Connection> {
        let mut flags = OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if self.read_only {
            flags |= OpenFlags::SQLITE_OPEN_READ_ONLY;
        } else {
            flags |= OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn = match &self.connection_type {
            DatabaseConnection::Memory => Connection::open_in_memory_with_flags(flags),
            DatabaseConnection::File(path) => Connection::open_with_flags(path, flags),
        }
        .map_err(|e| {
            Error::ConnectionError(format!(
                "Failed to connect to database {}: {}",
                self.describe(),
                e
            ))
        })?;

        conn.busy_timeout(self.busy_timeout)?;

        log::info!(
            "Opened SQLite database {} (read_only: {})",
            self.describe(),
            self.read_only
        );
        Ok(conn)
    }

    fn describe(&self) -> String {
        match &self.connection_type {
            DatabaseConnection::Memory => ":memory:".to_string(),
            DatabaseConnection::File(path) => path.display().to_string(),
        }
    }
}

fn parse_url(url: &str) -> Result<DatabaseConnection> {
    let url = url.trim();

    if url == ":memory:" || url == "sqlite::memory:" || url == "sqlite://:memory:" {
        return Ok(DatabaseConnection::Memory);
    }

    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"));

    match path {
        Some("") => Err(Error::ConfigurationError(format!(
            "Missing database path in URL: {}",
            url
        ))),
        Some(path) => Ok(DatabaseConnection::File(PathBuf::from(path))),
        None if has_sqlite_extension(Path::new(url)) => {
            Ok(DatabaseConnection::File(PathBuf::from(url)))
        }
        None => Err(Error::ConfigurationError(format!(
            "Unsupported database URL: {}",
            url
        ))),
    }
}

fn has_sqlite_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("db") | Some("sqlite") | Some("sqlite3")
    )
}
