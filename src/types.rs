use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tabled::Tabled;

/// One CSV row as published. Only the columns the report keeps are
/// deserialized; everything listed in `loader::DROPPED_COLUMNS` is ignored.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "OCCUR_DATE")]
    pub occur_date: Option<String>,
    #[serde(rename = "OCCUR_TIME")]
    pub occur_time: Option<String>,
    #[serde(rename = "BORO")]
    pub boro: Option<String>,
    #[serde(rename = "PRECINCT")]
    pub precinct: Option<String>,
    #[serde(rename = "STATISTICAL_MURDER_FLAG")]
    pub statistical_murder_flag: Option<String>,
    #[serde(rename = "PERP_AGE_GROUP")]
    pub perp_age_group: Option<String>,
    #[serde(rename = "PERP_SEX")]
    pub perp_sex: Option<String>,
    #[serde(rename = "PERP_RACE")]
    pub perp_race: Option<String>,
    #[serde(rename = "VIC_AGE_GROUP")]
    pub vic_age_group: Option<String>,
    #[serde(rename = "VIC_SEX")]
    pub vic_sex: Option<String>,
    #[serde(rename = "VIC_RACE")]
    pub vic_race: Option<String>,
}

/// Incident category: the five borough codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Borough {
    #[strum(serialize = "BRONX")]
    Bronx,
    #[strum(serialize = "BROOKLYN")]
    Brooklyn,
    #[strum(serialize = "MANHATTAN")]
    Manhattan,
    #[strum(serialize = "QUEENS")]
    Queens,
    #[strum(serialize = "STATEN ISLAND")]
    StatenIsland,
    #[default]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Sex {
    #[strum(serialize = "M")]
    Male,
    #[strum(serialize = "F")]
    Female,
    #[default]
    #[strum(serialize = "U")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum AgeGroup {
    #[strum(serialize = "<18")]
    Under18,
    #[strum(serialize = "18-24")]
    From18To24,
    #[strum(serialize = "25-44")]
    From25To44,
    #[strum(serialize = "45-64")]
    From45To64,
    #[strum(serialize = "65+")]
    Over65,
    #[default]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Race {
    #[strum(serialize = "BLACK")]
    Black,
    #[strum(serialize = "WHITE HISPANIC")]
    WhiteHispanic,
    #[strum(serialize = "BLACK HISPANIC")]
    BlackHispanic,
    #[strum(serialize = "WHITE")]
    White,
    #[strum(serialize = "ASIAN / PACIFIC ISLANDER")]
    AsianPacificIslander,
    #[strum(serialize = "AMERICAN INDIAN/ALASKAN NATIVE")]
    AmericanIndianAlaskanNative,
    #[default]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

/// Parsed murder flag. Anything other than `true`/`false` is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    #[strum(serialize = "true")]
    Severe,
    #[strum(serialize = "false")]
    NotSevere,
    #[default]
    #[strum(serialize = "unknown")]
    Unknown,
}

/// A cleaned incident row.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub occur_date: NaiveDate,
    pub occur_time: NaiveTime,
    pub borough: Borough,
    pub precinct: Option<u32>,
    pub severity: Severity,
    pub perp_age_group: AgeGroup,
    pub perp_sex: Sex,
    pub perp_race: Race,
    pub vic_age_group: AgeGroup,
    pub vic_sex: Sex,
    pub vic_race: Race,
}

/// One entry of the zero-filled monthly series. `month` is always the first
/// day of its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: NaiveDate,
    pub count: u64,
}

/// Additive decomposition of a monthly series with a fixed period.
///
/// `trend` and `residual` are `None` for the first and last `period / 2`
/// points. `figures[k]` is the normalized seasonal effect of calendar month
/// `k + 1`.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub start: NaiveDate,
    pub period: usize,
    pub observed: Vec<f64>,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
    pub figures: Vec<f64>,
}

/// Per-category counts before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTally {
    pub category: Borough,
    pub total_count: u64,
    pub severe_count: u64,
    pub unknown_severity: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Borough,
    pub total_count: u64,
    pub severe_count: u64,
    pub unknown_severity: u64,
    /// Percentage, 0 when the category has no incidents.
    pub severe_rate: f64,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlyTotal {
    pub year: i32,
    pub incidents: u64,
    pub severe: u64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CleanedRow {
    #[serde(rename = "OccurDate")]
    #[tabled(rename = "OccurDate")]
    pub occur_date: String,
    #[serde(rename = "OccurTime")]
    #[tabled(rename = "OccurTime")]
    pub occur_time: String,
    #[serde(rename = "Borough")]
    #[tabled(rename = "Borough")]
    pub borough: String,
    #[serde(rename = "Precinct")]
    #[tabled(rename = "Precinct")]
    pub precinct: String,
    #[serde(rename = "Severe")]
    #[tabled(rename = "Severe")]
    pub severe: String,
    #[serde(rename = "PerpAgeGroup")]
    #[tabled(rename = "PerpAgeGroup")]
    pub perp_age_group: String,
    #[serde(rename = "PerpSex")]
    #[tabled(rename = "PerpSex")]
    pub perp_sex: String,
    #[serde(rename = "PerpRace")]
    #[tabled(rename = "PerpRace")]
    pub perp_race: String,
    #[serde(rename = "VicAgeGroup")]
    #[tabled(rename = "VicAgeGroup")]
    pub vic_age_group: String,
    #[serde(rename = "VicSex")]
    #[tabled(rename = "VicSex")]
    pub vic_sex: String,
    #[serde(rename = "VicRace")]
    #[tabled(rename = "VicRace")]
    pub vic_race: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonthlyRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: u64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DecompositionRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Observed")]
    #[tabled(rename = "Observed")]
    pub observed: String,
    #[serde(rename = "Trend")]
    #[tabled(rename = "Trend")]
    pub trend: String,
    #[serde(rename = "Seasonal")]
    #[tabled(rename = "Seasonal")]
    pub seasonal: String,
    #[serde(rename = "Residual")]
    #[tabled(rename = "Residual")]
    pub residual: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SeasonalEffectRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Effect")]
    #[tabled(rename = "Effect")]
    pub effect: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CategoryCountRow {
    #[serde(rename = "Borough")]
    #[tabled(rename = "Borough")]
    pub borough: String,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: String,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub share_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RiskRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Borough")]
    #[tabled(rename = "Borough")]
    pub borough: String,
    #[serde(rename = "TotalIncidents")]
    #[tabled(rename = "TotalIncidents")]
    pub total_incidents: String,
    #[serde(rename = "SevereIncidents")]
    #[tabled(rename = "SevereIncidents")]
    pub severe_incidents: String,
    #[serde(rename = "UnknownSeverity")]
    #[tabled(rename = "UnknownSeverity")]
    pub unknown_severity: String,
    #[serde(rename = "SevereRate")]
    #[tabled(rename = "SevereRate")]
    pub severe_rate: String,
    #[serde(rename = "RiskScore")]
    #[tabled(rename = "RiskScore")]
    pub risk_score: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct YearlyRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: String,
    #[serde(rename = "SevereIncidents")]
    #[tabled(rename = "SevereIncidents")]
    pub severe: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HourlyRow {
    #[serde(rename = "Hour")]
    #[tabled(rename = "Hour")]
    pub hour: String,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: u64,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub months: usize,
    pub total_severe: u64,
    pub overall_severe_rate: f64,
    pub decomposition_available: bool,
}
