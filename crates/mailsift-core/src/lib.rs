use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod table;
pub mod urls;

// Re-export for convenience
pub use client::{ExportPayload, ExtractionClient};
pub use table::{Column, EmailTable, PageInfo};
pub use urls::{MAX_URLS, parse_url_lines};

/// One extracted email address as returned by the extraction service.
///
/// Records are immutable once received. There is no stable id field —
/// identity is structural and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub email: String,
    pub status: EmailStatus,
    pub domain: String,
    /// URL the address was found on.
    pub source: String,
}

/// Validation verdict assigned by the extraction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailStatus {
    Valid,
    Invalid,
}

impl EmailStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
        }
    }
}

/// How thoroughly the server scans each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    Fast,
    Deep,
}

impl ScanMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Deep => "deep",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Fast => Self::Deep,
            Self::Deep => Self::Fast,
        }
    }
}

/// Server-side result filter: which verdicts to include in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Valid,
    Invalid,
    All,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::All => "all",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Valid => Self::Invalid,
            Self::Invalid => Self::All,
            Self::All => Self::Valid,
        }
    }
}

/// Summary statistics attached to an extraction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub scan_mode: ScanMode,
    pub urls_processed: usize,
    /// Server-side processing time in seconds.
    pub processing_time: f64,
    pub valid_emails: usize,
    pub invalid_emails: usize,
}

/// A complete, successful extraction result.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub count: usize,
    pub emails: Vec<EmailRecord>,
    pub stats: ExtractionStats,
    /// True when the server answered from its cache.
    pub cached: bool,
}

/// Rejections of the URL input, raised before any request is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlInputError {
    #[error("no URLs provided")]
    Empty,
    #[error("too many URLs: {count} given, limit is {max}", max = MAX_URLS)]
    TooMany { count: usize },
    #[error("not a valid URL: {line}")]
    Invalid { line: String },
}

/// Failures talking to the extraction service.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {status}")]
    Http { status: u16 },
    /// The response body carried an explicit error status.
    #[error("{0}")]
    Server(String),
}
