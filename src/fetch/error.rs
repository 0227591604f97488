// src/fetch/error.rs
use thiserror::Error;

/// Coarse failure category, stable enough for log fields and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Configuration,
    Transport,
    Status,
    Shape,
    Timeout,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Transport => "transport",
            FailureKind::Status => "status",
            FailureKind::Shape => "shape",
            FailureKind::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure of one fetch-and-normalize call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Missing credential/parameter or unusable URL; detected before any I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not be sent or no response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived with a non-success status.
    #[error("HTTP {code} {reason}")]
    Status { code: u16, reason: String },

    /// The body did not parse or lacked the fields the extractor needs.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Caller-imposed deadline elapsed or the caller aborted the request.
    #[error("request timed out: {0}")]
    Timeout(String),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Configuration(_) => FailureKind::Configuration,
            FetchError::Transport(_) => FailureKind::Transport,
            FetchError::Status { .. } => FailureKind::Status,
            FetchError::Shape(_) => FailureKind::Shape,
            FetchError::Timeout(_) => FailureKind::Timeout,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Extractor-level failure: the body was readable but not the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ShapeError(pub String);

impl ShapeError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<ShapeError> for FetchError {
    fn from(e: ShapeError) -> Self {
        FetchError::Shape(e.0)
    }
}

pub type FetchResult = Result<crate::fetch::types::Fact, FetchError>;
