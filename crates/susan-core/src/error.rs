//! Error types for the susan-core library.

use thiserror::Error;

/// Main error type for the susan library.
#[derive(Error, Debug)]
pub enum SusanError {
    /// Order extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Directory fetch error.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The operation was cancelled before it finished.
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors raised while turning order text into a draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No `<item><quantity><unit>` triple was recognized.
    #[error("주문 품목을 찾을 수 없습니다. 품목, 수량, 단위를 함께 말해주세요 (예: 고등어 50박스).")]
    NoItems,

    /// Field validation failed.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
}

/// Errors raised while loading directory snapshots.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Transport-level failure.
    #[cfg(feature = "native")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body was not a recognized list shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the susan library.
pub type Result<T> = std::result::Result<T, SusanError>;
