use crate::config::ParsePolicy;
use crate::error::{ReportError, Result};
use crate::types::{IncidentRecord, RawRow};
use crate::util::{coerce, parse_date_mdy, parse_time_hms, parse_u32_safe};
use csv::ReaderBuilder;
use std::io::Read;

/// Columns that carry no information for the report: identifiers, location
/// descriptors and coordinates.
pub const DROPPED_COLUMNS: &[&str] = &[
    "INCIDENT_KEY",
    "LOC_OF_OCCUR_DESC",
    "JURISDICTION_CODE",
    "LOC_CLASSFCTN_DESC",
    "LOCATION_DESC",
    "X_COORD_CD",
    "Y_COORD_CD",
    "Latitude",
    "Longitude",
    "Lon_Lat",
];

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
    /// Which of `DROPPED_COLUMNS` were actually present in the header.
    pub dropped_columns: Vec<String>,
}

/// Reads the raw CSV and returns the cleaned table.
///
/// Records whose width differs from the header, and date or time failures,
/// are handled per `policy`; categorical fields never fail and fall back to
/// their `Unknown` variant.
pub fn load_and_clean<R: Read>(
    reader: R,
    policy: ParsePolicy,
) -> Result<(Vec<IncidentRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let dropped_columns: Vec<String> = headers
        .iter()
        .filter(|h| DROPPED_COLUMNS.contains(&h.trim()))
        .map(|h| h.trim().to_string())
        .collect();
    log::debug!("Dropping columns: {}", dropped_columns.join(", "));

    let mut total_rows = 0usize;
    let mut dropped_rows = 0usize;
    let mut records: Vec<IncidentRecord> = Vec::new();

    for result in rdr.records() {
        total_rows += 1;
        let row_no = total_rows;

        // Every record must be exactly as wide as the header.
        let row = result.map_err(ReportError::from).and_then(|record| {
            if record.len() != headers.len() {
                return Err(ReportError::MalformedRecord {
                    row: row_no,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            Ok(record.deserialize::<RawRow>(Some(&headers))?)
        });
        let row = match row {
            Ok(r) => r,
            Err(e) if policy == ParsePolicy::Strict => return Err(e),
            Err(e) => {
                log::warn!("Row {row_no}: malformed record skipped: {e}");
                dropped_rows += 1;
                continue;
            }
        };

        let parsed = parse_date_mdy(row.occur_date.as_deref())
            .ok_or_else(|| parse_failure(row_no, "OCCUR_DATE", row.occur_date.as_deref()))
            .and_then(|date| {
                parse_time_hms(row.occur_time.as_deref())
                    .map(|time| (date, time))
                    .ok_or_else(|| parse_failure(row_no, "OCCUR_TIME", row.occur_time.as_deref()))
            });
        let (occur_date, occur_time) = match parsed {
            Ok(dt) => dt,
            Err(e) if policy == ParsePolicy::Strict => return Err(e),
            Err(e) => {
                log::warn!("{e}; row dropped");
                dropped_rows += 1;
                continue;
            }
        };

        records.push(IncidentRecord {
            occur_date,
            occur_time,
            borough: coerce(row.boro.as_deref()),
            precinct: parse_u32_safe(row.precinct.as_deref()),
            severity: coerce(row.statistical_murder_flag.as_deref()),
            perp_age_group: coerce(row.perp_age_group.as_deref()),
            perp_sex: coerce(row.perp_sex.as_deref()),
            perp_race: coerce(row.perp_race.as_deref()),
            vic_age_group: coerce(row.vic_age_group.as_deref()),
            vic_sex: coerce(row.vic_sex.as_deref()),
            vic_race: coerce(row.vic_race.as_deref()),
        });
    }

    let report = LoadReport {
        total_rows,
        kept_rows: records.len(),
        dropped_rows,
        dropped_columns,
    };
    Ok((records, report))
}

fn parse_failure(row: usize, field: &'static str, value: Option<&str>) -> ReportError {
    ReportError::ParseFailure {
        row,
        field,
        value: value.unwrap_or_default().to_string(),
    }
}
