use thiserror::Error;

/// Broad error classes, so a host can tell argument problems apart from
/// domain problems without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No suffix index has been loaded
    NotLoaded,
    /// Domain string failed the structural preconditions
    InvalidDomain,
    /// URL has no scheme separator or no host
    InvalidUrl,
    /// Host called an operation with the wrong number of arguments
    WrongArity,
    /// Host called an operation that does not exist
    UnknownOperation,
    /// IDNA conversion failed
    Encoding,
    /// Fetching or reading suffix list data failed
    Source,
}

/// Classifies suffix list download errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadErrorKind {
    /// HTTP request failed or returned an error status
    RequestFailed,
    /// Downloaded data did not parse into any rule
    VerificationFailed,
    /// Nothing cached and no fallback allowed
    Unavailable,
}

/// Domain extractor error types
#[derive(Error, Debug)]
pub enum PslError {
    #[error("Suffix list was not loaded. Call load() first")]
    NotLoaded,

    #[error("Invalid domain detected: {0}")]
    InvalidDomain(String),

    #[error("url is invalid: {0}")]
    InvalidUrl(String),

    #[error("wrong number of arguments for {operation}: expected {expected}, got {got}")]
    WrongArity {
        operation: String,
        expected: String,
        got: usize,
    },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("IDNA conversion failed: {0}")]
    Encoding(String),

    #[error("Download error: {message}")]
    Download {
        kind: DownloadErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PslError {
    /// Returns the broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PslError::NotLoaded => ErrorKind::NotLoaded,
            PslError::InvalidDomain(_) => ErrorKind::InvalidDomain,
            PslError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            PslError::WrongArity { .. } => ErrorKind::WrongArity,
            PslError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            PslError::Encoding(_) => ErrorKind::Encoding,
            PslError::Download { .. } | PslError::Io(_) => ErrorKind::Source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PslError>;
