//! Error types for the migration run.

use thiserror::Error;

/// Every way a migration run can fail. Each variant is fatal.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Required input missing or malformed. Raised before any network activity.
    #[error("{0}")]
    Configuration(String),

    /// Endpoint unreachable, connection string unparsable, or a probe query failed
    #[error("failed to connect to {endpoint}: {message}")]
    Connectivity { endpoint: String, message: String },

    /// Source locator does not name a database
    #[error("{0}")]
    Validation(String),

    /// Source server is running a newer major version than the target
    #[error(
        "source is running a more recent version than target. expected >= {target_version}, got {source_version}"
    )]
    VersionMismatch {
        source_version: String,
        target_version: String,
    },

    /// Dump/restore pipeline could not be started or exited non-zero
    #[error("failed to import database: {stage}: {message}")]
    Execution { stage: String, message: String },

    /// Ctrl+C or SIGTERM arrived before the run finished
    #[error("interrupted by shutdown signal")]
    Interrupted,
}

impl MigrateError {
    pub fn configuration(message: impl Into<String>) -> Self {
        MigrateError::Configuration(message.into())
    }

    pub fn connectivity(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Connectivity {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn execution(stage: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Execution {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Short name of the error kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            MigrateError::Configuration(_) => "configuration",
            MigrateError::Connectivity { .. } => "connectivity",
            MigrateError::Validation(_) => "validation",
            MigrateError::VersionMismatch { .. } => "version_mismatch",
            MigrateError::Execution { .. } => "execution",
            MigrateError::Interrupted => "interrupted",
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
