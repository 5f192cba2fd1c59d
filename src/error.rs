use thiserror::Error;

/// All errors produced while building the incident report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The dataset could not be fetched or opened.
    #[error("Source unavailable ({location}): {source}")]
    SourceUnavailable {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A date or time field did not match its expected format (strict policy).
    #[error("Row {row}: could not parse {field} from {value:?}")]
    ParseFailure {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// A record's field count does not match the header.
    #[error("Row {row}: expected {expected} fields, found {found}")]
    MalformedRecord {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The monthly series is too short to decompose.
    #[error("Insufficient data for decomposition: {len} months, need at least {required}")]
    InsufficientData { len: usize, required: usize },

    /// A series value was negative or not finite.
    #[error("Invalid series value at index {index}: {value}")]
    InvalidInput { index: usize, value: f64 },

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
