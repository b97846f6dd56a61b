use std::path::PathBuf;

/// Errors reading or writing a weight file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to access weight file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode weight file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: bincode::Error,
    },

    #[error("failed to encode weight file {path}: {source}")]
    Encode {
        path: PathBuf,
        source: bincode::Error,
    },

    #[error("weight file {path} holds {found} tables, expected {expected}")]
    TableCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("table {table} in {path} has {found} weights, expected {expected}")]
    TableSize {
        path: PathBuf,
        table: usize,
        expected: usize,
        found: usize,
    },
}

impl PersistError {
    /// Whether the file simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Errors in agent or training configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
