use std::fmt;

use commentscope_engine::ValidationError;

use crate::provider::AnalysisError;

/// Result type for commentscope-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Report encoding or invariant error
    Report(commentscope_types::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Submitted input was not a video link
    Validation(ValidationError),

    /// The analysis provider gave up
    Analysis(AnalysisError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Report(err) => write!(f, "Report error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Validation(err) => write!(f, "{}", err),
            Error::Analysis(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Report(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Validation(err) => Some(err),
            Error::Analysis(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<commentscope_types::Error> for Error {
    fn from(err: commentscope_types::Error) -> Self {
        Error::Report(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<AnalysisError> for Error {
    fn from(err: AnalysisError) -> Self {
        Error::Analysis(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
