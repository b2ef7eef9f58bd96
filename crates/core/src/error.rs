use crate::export::ExportFormat;
use thiserror::Error;

/// A single exporter could not produce its artifact.
///
/// Carries the format that failed so callers can retry or skip that format alone.
#[derive(Debug, Error)]
#[error("{format} export failed: {cause}")]
pub struct ExportError {
    pub format: ExportFormat,
    #[source]
    pub cause: ExportCause,
}

impl ExportError {
    pub fn new(format: ExportFormat, cause: impl Into<ExportCause>) -> Self {
        Self {
            format,
            cause: cause.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportCause {
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("document packaging error: {0}")]
    Packaging(String),

    #[error("unsupported character U+{codepoint:04X} in record {record}")]
    UnsupportedCharacter { record: usize, codepoint: u32 },
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("missing api key for {0}")]
    MissingApiKey(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("{backend} returned no text")]
    EmptyResponse { backend: String },
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
