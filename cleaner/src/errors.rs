//! Custom error types for the database cleaner
//!
//! Provides structured error handling with context for the different failure
//! scenarios. An optional table or column being absent is not an error: rules
//! report it as a skipped outcome instead.

use std::fmt;

/// Main error type for the database cleaner
#[derive(Debug)]
pub enum CleanerError {
    /// Configuration-related errors, fatal for the run or the process
    Configuration(ConfigurationError),

    /// Connection-level database errors
    Database(DatabaseError),

    /// A single statement failed
    Statement(StatementError),

    /// Scheduler registration errors
    Schedule(ScheduleError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigurationError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Always-required tables are missing from the target database
    MissingRequiredTables { tables: Vec<String> },
}

/// Connection-level database error variants
#[derive(Debug)]
pub enum DatabaseError {
    /// Connection failed
    ConnectionFailed { reason: String },

    /// URL scheme is neither MySQL/MariaDB nor SQLite
    UnsupportedUrl { scheme: String },
}

/// A delete, truncate or optimize statement that the database rejected
#[derive(Debug, Clone)]
pub struct StatementError {
    pub statement: String,
    pub reason: String,
}

/// Scheduler error variants
#[derive(Debug)]
pub enum ScheduleError {
    /// Cron expression rejected before registration
    InvalidCron { expression: String, reason: String },

    /// Scheduler refused to create or accept the job
    RegistrationFailed { reason: String },
}

impl fmt::Display for CleanerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanerError::Configuration(e) => write!(f, "Configuration error: {}", e),
            CleanerError::Database(e) => write!(f, "Database error: {}", e),
            CleanerError::Statement(e) => write!(f, "Statement error: {}", e),
            CleanerError::Schedule(e) => write!(f, "Schedule error: {}", e),
            CleanerError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigurationError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            ConfigurationError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigurationError::MissingRequiredTables { tables } => {
                write!(f, "Required tables are missing: {}", tables.join(", "))
            }
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::ConnectionFailed { reason } => {
                write!(f, "Database connection failed: {}", reason)
            }
            DatabaseError::UnsupportedUrl { scheme } => {
                write!(
                    f,
                    "Unsupported database URL scheme '{}' (expected mysql, mariadb or sqlite)",
                    scheme
                )
            }
        }
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' failed: {}", self.statement, self.reason)
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidCron { expression, reason } => {
                write!(f, "Invalid cron schedule '{}': {}", expression, reason)
            }
            ScheduleError::RegistrationFailed { reason } => {
                write!(f, "Failed to register cleanup job: {}", reason)
            }
        }
    }
}

impl std::error::Error for CleanerError {}
impl std::error::Error for ConfigurationError {}
impl std::error::Error for DatabaseError {}
impl std::error::Error for StatementError {}
impl std::error::Error for ScheduleError {}

impl CleanerError {
    /// True when the run was refused before touching any data
    pub fn is_configuration(&self) -> bool {
        matches!(self, CleanerError::Configuration(_))
    }
}

// Conversions from anyhow::Error for the application boundary
impl From<anyhow::Error> for CleanerError {
    fn from(err: anyhow::Error) -> Self {
        CleanerError::Other(err.to_string())
    }
}

impl From<ConfigurationError> for CleanerError {
    fn from(err: ConfigurationError) -> Self {
        CleanerError::Configuration(err)
    }
}

impl From<DatabaseError> for CleanerError {
    fn from(err: DatabaseError) -> Self {
        CleanerError::Database(err)
    }
}

impl From<StatementError> for CleanerError {
    fn from(err: StatementError) -> Self {
        CleanerError::Statement(err)
    }
}

impl From<ScheduleError> for CleanerError {
    fn from(err: ScheduleError) -> Self {
        CleanerError::Schedule(err)
    }
}
