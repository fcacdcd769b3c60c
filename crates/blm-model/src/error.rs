//! Error types for the matching pipeline.

use thiserror::Error;

use crate::side::Side;

/// Coarse category of a failure, used by callers to decide what to tell the
/// operator (and, in the CLI, which exit code to use).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Column selection or option values are wrong; the caller must fix them.
    Configuration,
    /// An input file could not be decoded as text.
    Encoding,
    /// Filesystem failure.
    Io,
    /// A table operation failed.
    Data,
    /// The caller cancelled the run.
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Encoding => write!(f, "encoding"),
            Self::Io => write!(f, "io"),
            Self::Data => write!(f, "data"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Errors that abort a matching run.
///
/// Per-record problems (a missing name, a transliteration failure) are not
/// errors; they degrade that record and are counted in
/// [`CanonicalStats`](crate::CanonicalStats).
#[derive(Debug, Error)]
pub enum MatchError {
    // === Configuration ===
    /// A selected column does not exist in its table.
    #[error("{side} table has no column '{column}'")]
    MissingColumn { side: Side, column: String },

    /// Similarity threshold outside 0..=100.
    #[error("threshold must be between 0 and 100, got {value}")]
    InvalidThreshold { value: i64 },

    /// Any other invalid option or config value.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("failed to parse config: {message}")]
    ConfigParse { message: String },

    // === Runtime ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// The run was cancelled between source rows.
    #[error("matching cancelled after {processed} of {total} source rows")]
    Cancelled { processed: usize, total: usize },
}

impl MatchError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumn { .. }
            | Self::InvalidThreshold { .. }
            | Self::InvalidConfig { .. }
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. } => ErrorKind::Configuration,
            Self::DataFrame { .. } => ErrorKind::Data,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<polars::prelude::PolarsError> for MatchError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = MatchError::MissingColumn {
            side: Side::Source,
            column: "citizenship_number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "source table has no column 'citizenship_number'"
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("name".into());
        let err: MatchError = polars_err.into();
        assert!(matches!(err, MatchError::DataFrame { .. }));
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_cancelled_kind() {
        let err = MatchError::Cancelled {
            processed: 3,
            total: 10,
        };
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(err.to_string().contains("3 of 10"));
    }
}
