use thiserror::Error;

/// Top-level error type for Lectern.
///
/// Subsystem crates define their own error types and implement
/// `From<LecternError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LecternError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for LecternError {
    fn from(err: toml::de::Error) -> Self {
        LecternError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LecternError {
    fn from(err: toml::ser::Error) -> Self {
        LecternError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Lectern operations.
pub type Result<T> = std::result::Result<T, LecternError>;
