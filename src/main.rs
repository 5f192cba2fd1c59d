// Entry point and high-level report flow.
//
// One batch run: fetch the CSV, clean it, derive the monthly series, decompose
// it, rank boroughs by risk, then write every artifact and print previews.
// Each step takes the previous step's output by reference and returns a new
// value; nothing is mutated in place.
mod aggregate;
mod charts;
mod config;
mod decompose;
mod error;
mod loader;
mod output;
mod reports;
mod risk;
mod source;
mod types;
mod util;

use clap::Parser;
use config::{Args, RunConfig};
use error::{ReportError, Result};
use loader::LoadReport;
use std::path::Path;
use types::{CategorySummary, Decomposition, IncidentRecord, MonthlyCount};

/// Everything derived from the cleaned table in one run.
struct Analysis {
    records: Vec<IncidentRecord>,
    load: LoadReport,
    monthly: Vec<MonthlyCount>,
    decomposition: Option<Decomposition>,
    category_counts: Vec<(types::Borough, u64)>,
    risk: Vec<CategorySummary>,
    yearly: Vec<types::YearlyTotal>,
    hourly: [u64; 24],
}

/// Fetch and clean the dataset.
fn handle_load(cfg: &RunConfig) -> Result<(Vec<IncidentRecord>, LoadReport)> {
    let bytes = source::fetch(&cfg.source, cfg.timeout)?;
    let (records, load) = loader::load_and_clean(bytes.as_slice(), cfg.policy)?;
    log::info!(
        "Processing dataset... ({} rows read, {} kept, {} dropped)",
        util::format_int(load.total_rows),
        util::format_int(load.kept_rows),
        util::format_int(load.dropped_rows)
    );
    if !load.dropped_columns.is_empty() {
        log::info!("Dropped columns: {}", load.dropped_columns.join(", "));
    }
    Ok((records, load))
}

/// Derive every table from the cleaned records.
///
/// A series too short to decompose is not fatal: the decomposition is
/// skipped and all other tables are still produced.
fn analyze(records: Vec<IncidentRecord>, load: LoadReport, risk_weight: f64) -> Result<Analysis> {
    let monthly = aggregate::monthly_counts(&records);
    let decomposition = match decompose::decompose_monthly(&monthly) {
        Ok(d) => Some(d),
        Err(e @ ReportError::InsufficientData { .. }) => {
            log::warn!("Skipping seasonal decomposition: {e}");
            None
        }
        Err(e) => return Err(e),
    };
    let category_counts = aggregate::category_counts(&records);
    let risk = risk::rank_by_risk(&aggregate::category_tallies(&records), risk_weight);
    let yearly = aggregate::yearly_totals(&records);
    let hourly = aggregate::hourly_profile(&records);
    Ok(Analysis {
        records,
        load,
        monthly,
        decomposition,
        category_counts,
        risk,
        yearly,
        hourly,
    })
}

/// Write all artifacts into `dir` and print console previews.
fn write_reports(a: &Analysis, dir: &Path, preview_rows: usize) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut charts_txt = String::new();

    let cleaned = reports::cleaned_rows(&a.records);
    output::write_csv(&dir.join("cleaned_incidents.csv"), &cleaned)?;
    output::preview_table("Cleaned Incidents", None, &cleaned, preview_rows);

    let counts = reports::category_count_rows(&a.category_counts);
    output::write_csv(&dir.join("category_counts.csv"), &counts)?;
    output::preview_table("Incidents by Borough", None, &counts, preview_rows);
    let bars: Vec<(String, f64)> = a
        .category_counts
        .iter()
        .map(|(b, c)| (b.to_string(), *c as f64))
        .collect();
    charts_txt.push_str(&charts::bar_chart("Incidents by borough", &bars));
    charts_txt.push('\n');

    let monthly = reports::monthly_rows(&a.monthly);
    output::write_csv(&dir.join("monthly_counts.csv"), &monthly)?;
    output::preview_table(
        "Monthly Incident Counts",
        Some("zero-filled, ascending"),
        &monthly,
        preview_rows,
    );
    let series: Vec<Option<f64>> = a.monthly.iter().map(|m| Some(m.count as f64)).collect();
    let first = monthly.first().map(|m| m.month.as_str()).unwrap_or_default();
    let last = monthly.last().map(|m| m.month.as_str()).unwrap_or_default();
    charts_txt.push_str(&charts::line_chart("Incidents per month", &series, first, last));
    charts_txt.push('\n');

    if let Some(d) = &a.decomposition {
        let rows = reports::decomposition_rows(d);
        output::write_csv(&dir.join("decomposition.csv"), &rows)?;
        output::preview_table(
            "Seasonal Decomposition",
            Some("additive, period 12; trend undefined at the edges"),
            &rows[d.period / 2..],
            preview_rows,
        );

        let effects = reports::seasonal_effect_rows(d);
        output::write_csv(&dir.join("seasonal_effects.csv"), &effects)?;
        output::preview_table(
            "Seasonal Effects",
            Some("ranked by magnitude"),
            &effects,
            preview_rows,
        );
        charts_txt.push_str(&charts::decomposition_panel(d));
        charts_txt.push('\n');
        let bars: Vec<(String, f64)> = d
            .ranked_effects()
            .into_iter()
            .map(|(m, e)| (util::month_name(m).to_string(), e))
            .collect();
        charts_txt.push_str(&charts::bar_chart("Seasonal effect by month", &bars));
        charts_txt.push('\n');
    }

    let risk = reports::risk_rows(&a.risk);
    output::write_csv(&dir.join("category_risk.csv"), &risk)?;
    output::preview_table(
        "Borough Risk Ranking",
        Some("risk score = severe rate x weight"),
        &risk,
        preview_rows,
    );
    let bars: Vec<(String, f64)> = a
        .risk
        .iter()
        .map(|s| (s.category.to_string(), s.risk_score))
        .collect();
    charts_txt.push_str(&charts::bar_chart("Risk score by borough", &bars));
    charts_txt.push('\n');

    let yearly = reports::yearly_rows(&a.yearly);
    output::write_csv(&dir.join("yearly_totals.csv"), &yearly)?;
    output::preview_table("Yearly Totals", None, &yearly, preview_rows);

    let hourly = reports::hourly_rows(&a.hourly);
    output::write_csv(&dir.join("hourly_profile.csv"), &hourly)?;
    let bars: Vec<(String, f64)> = hourly
        .iter()
        .map(|h| (h.hour.clone(), h.incidents as f64))
        .collect();
    charts_txt.push_str(&charts::bar_chart("Incidents by hour of day", &bars));

    output::write_text(&dir.join("charts.txt"), &charts_txt)?;

    let summary =
        reports::generate_summary(&a.records, &a.load, &a.monthly, a.decomposition.as_ref());
    output::write_json(&dir.join("summary.json"), &summary)?;
    println!("Summary Stats (summary.json):");
    println!(
        "{{\"rows_kept\": {}, \"months\": {}, \"overall_severe_rate\": {}}}\n",
        util::format_int(summary.rows_kept),
        summary.months,
        util::format_number(summary.overall_severe_rate, 2)
    );

    log::info!("Outputs saved to {}", dir.display());
    Ok(())
}

fn run(cfg: &RunConfig) -> Result<()> {
    let (records, load) = handle_load(cfg)?;
    let analysis = analyze(records, load, cfg.risk_weight)?;
    write_reports(&analysis, &cfg.output_dir, cfg.preview_rows)
}

fn main() {
    pretty_env_logger::init();
    let result = RunConfig::try_from(Args::parse()).and_then(|cfg| run(&cfg));
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Failed to generate report: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsePolicy;
    use crate::source::DataSource;
    use std::io::Write;
    use std::time::Duration;

    const HEADER: &str = "INCIDENT_KEY,OCCUR_DATE,OCCUR_TIME,BORO,STATISTICAL_MURDER_FLAG,VIC_SEX";

    fn write_dataset(months: u32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for m in 0..months {
            let year = 2018 + m / 12;
            let month = m % 12 + 1;
            // Skip every July so the series needs zero-filling.
            if month == 7 {
                continue;
            }
            for k in 0..(1 + m % 4) {
                let boro = if k % 2 == 0 { "BRONX" } else { "QUEENS" };
                let flag = if k == 1 { "true" } else { "false" };
                writeln!(file, "{m}{k},{month:02}/1{k}/{year},0{k}:15:00,{boro},{flag},M").unwrap();
            }
        }
        file.flush().unwrap();
        file
    }

    fn config(input: &Path, out: &Path) -> RunConfig {
        RunConfig {
            source: DataSource::File(input.to_path_buf()),
            output_dir: out.to_path_buf(),
            policy: ParsePolicy::Strict,
            risk_weight: 2.0,
            timeout: Duration::from_secs(5),
            preview_rows: 2,
        }
    }

    #[test]
    fn full_run_writes_every_artifact() {
        let input = write_dataset(36);
        let out = tempfile::tempdir().unwrap();
        run(&config(input.path(), out.path())).unwrap();

        for name in [
            "cleaned_incidents.csv",
            "category_counts.csv",
            "monthly_counts.csv",
            "decomposition.csv",
            "seasonal_effects.csv",
            "category_risk.csv",
            "yearly_totals.csv",
            "hourly_profile.csv",
            "charts.txt",
            "summary.json",
        ] {
            assert!(out.path().join(name).exists(), "missing {name}");
        }

        let monthly = std::fs::read_to_string(out.path().join("monthly_counts.csv")).unwrap();
        // header + 36 contiguous months, Julys present with zero
        assert_eq!(monthly.lines().count(), 37);
        assert!(monthly.contains("2018-07,0"));

        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["months"], 36);
        assert_eq!(summary["decomposition_available"], true);
    }

    #[test]
    fn short_series_skips_decomposition_only() {
        let input = write_dataset(12);
        let out = tempfile::tempdir().unwrap();
        run(&config(input.path(), out.path())).unwrap();

        assert!(!out.path().join("decomposition.csv").exists());
        assert!(!out.path().join("seasonal_effects.csv").exists());
        assert!(out.path().join("category_risk.csv").exists());
        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["decomposition_available"], false);
    }

    #[test]
    fn missing_source_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir.path().join("absent.csv"), &dir.path().join("out"));
        let err = run(&cfg).unwrap_err();
        assert!(matches!(err, ReportError::SourceUnavailable { .. }));
        let message = err.to_string();
        assert!(message.starts_with("Source unavailable ("), "{message}");
        assert!(message.contains("absent.csv"), "{message}");
        assert!(!message.contains("SourceUnavailable {"), "{message}");
        assert!(!dir.path().join("out").exists());
    }
}
