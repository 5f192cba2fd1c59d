// Run configuration.
//
// Defaults are constants so a bare invocation reproduces the standard report;
// the CLI only overrides them.

use crate::error::{ReportError, Result};
use crate::source::DataSource;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str =
    "https://data.cityofnewyork.us/api/views/833y-fsy8/rows.csv?accessType=DOWNLOAD";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_RISK_WEIGHT: f64 = 2.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// What to do with a row whose date or time cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Drop the row, log it, and keep going.
    #[default]
    Lenient,
    /// Abort the load on the first bad row.
    Strict,
}

/// Incident report generator: cleans the incident table, builds the monthly
/// series, decomposes it and ranks boroughs by risk.
#[derive(Debug, Parser)]
#[command(name = "incident_report", version, about)]
pub struct Args {
    /// CSV download URL.
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub url: String,

    /// Read a local CSV file instead of downloading.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory the report artifacts are written to.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Abort on the first unparseable date/time instead of dropping the row.
    #[arg(long)]
    pub strict: bool,

    /// Weight applied to the severe rate when computing risk scores.
    #[arg(long, default_value_t = DEFAULT_RISK_WEIGHT)]
    pub risk_weight: f64,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Rows shown in each console table preview.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DataSource,
    pub output_dir: PathBuf,
    pub policy: ParsePolicy,
    pub risk_weight: f64,
    pub timeout: Duration,
    pub preview_rows: usize,
}

impl TryFrom<Args> for RunConfig {
    type Error = ReportError;

    fn try_from(args: Args) -> Result<Self> {
        if !args.risk_weight.is_finite() || args.risk_weight < 0.0 {
            return Err(ReportError::InvalidConfig(format!(
                "risk weight must be a non-negative number, got {}",
                args.risk_weight
            )));
        }
        if args.timeout_secs == 0 {
            return Err(ReportError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }
        let source = match args.input {
            Some(path) => DataSource::File(path),
            None => DataSource::Url(args.url),
        };
        Ok(Self {
            source,
            output_dir: args.output_dir,
            policy: if args.strict {
                ParsePolicy::Strict
            } else {
                ParsePolicy::Lenient
            },
            risk_weight: args.risk_weight,
            timeout: Duration::from_secs(args.timeout_secs),
            preview_rows: args.preview_rows,
        })
    }
}
