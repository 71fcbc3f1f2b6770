use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("pdf parse error: {0}")]
    Pdf(String),

    #[error("docx parse error: {0}")]
    Docx(String),
}

/// Per-source fetch outcome; recovered as empty text, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("request error: {0}")]
    Request(String),

    #[error("http status {0}")]
    Status(u16),

    #[error("body read error: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("document contains no extractable text")]
    EmptyDocument,

    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T, E = CheckError> = std::result::Result<T, E>;
