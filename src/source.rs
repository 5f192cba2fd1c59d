// Dataset retrieval.
//
// The whole CSV is read into memory; one fetch per run, no retries.

use crate::error::{ReportError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches the raw CSV bytes.
///
/// # Errors
///
/// Returns [`ReportError::SourceUnavailable`] if the file cannot be read, the
/// request fails or times out, or the server answers with a non-success status.
pub fn fetch(source: &DataSource, timeout: Duration) -> Result<Vec<u8>> {
    let unavailable = |e: Box<dyn std::error::Error + Send + Sync>| ReportError::SourceUnavailable {
        location: source.to_string(),
        source: e,
    };

    match source {
        DataSource::File(path) => {
            log::info!("Reading dataset from {}", path.display());
            std::fs::read(path).map_err(|e| unavailable(Box::new(e)))
        }
        DataSource::Url(url) => {
            log::info!("Downloading dataset: {url}");
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| unavailable(Box::new(e)))?;
            let response = client
                .get(url)
                .send()
                .and_then(reqwest::blocking::Response::error_for_status)
                .map_err(|e| unavailable(Box::new(e)))?;
            let bytes = response.bytes().map_err(|e| unavailable(Box::new(e)))?;
            log::info!("Downloaded {} bytes", crate::util::format_int(bytes.len()));
            Ok(bytes.to_vec())
        }
    }
}
