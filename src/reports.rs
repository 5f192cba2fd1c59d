use crate::types::{
    Borough, CategoryCountRow, CategorySummary, CleanedRow, Decomposition, DecompositionRow,
    HourlyRow, IncidentRecord, MonthlyCount, MonthlyRow, RiskRow, SeasonalEffectRow, Severity,
    SummaryStats, YearlyRow, YearlyTotal,
};
use crate::loader::LoadReport;
use crate::util::{format_int, format_number, format_optional, month_name, percent};

pub fn cleaned_rows(data: &[IncidentRecord]) -> Vec<CleanedRow> {
    data.iter()
        .map(|r| CleanedRow {
            occur_date: r.occur_date.format("%Y-%m-%d").to_string(),
            occur_time: r.occur_time.format("%H:%M:%S").to_string(),
            borough: r.borough.to_string(),
            precinct: r.precinct.map(|p| p.to_string()).unwrap_or_default(),
            severe: r.severity.to_string(),
            perp_age_group: r.perp_age_group.to_string(),
            perp_sex: r.perp_sex.to_string(),
            perp_race: r.perp_race.to_string(),
            vic_age_group: r.vic_age_group.to_string(),
            vic_sex: r.vic_sex.to_string(),
            vic_race: r.vic_race.to_string(),
        })
        .collect()
}

pub fn monthly_rows(series: &[MonthlyCount]) -> Vec<MonthlyRow> {
    series
        .iter()
        .map(|m| MonthlyRow {
            month: m.month.format("%Y-%m").to_string(),
            incidents: m.count,
        })
        .collect()
}

/// One row per month; undefined trend/residual values are left empty.
pub fn decomposition_rows(d: &Decomposition) -> Vec<DecompositionRow> {
    (0..d.observed.len())
        .map(|i| DecompositionRow {
            month: d
                .date_of(i)
                .map(|m| m.format("%Y-%m").to_string())
                .unwrap_or_default(),
            observed: format!("{:.0}", d.observed[i]),
            trend: format_optional(d.trend[i], 3),
            seasonal: format!("{:.3}", d.seasonal[i]),
            residual: format_optional(d.residual[i], 3),
        })
        .collect()
}

pub fn seasonal_effect_rows(d: &Decomposition) -> Vec<SeasonalEffectRow> {
    d.ranked_effects()
        .into_iter()
        .enumerate()
        .map(|(idx, (month, effect))| SeasonalEffectRow {
            rank: idx + 1,
            month: month_name(month).to_string(),
            effect: format!("{:+.3}", effect),
        })
        .collect()
}

pub fn category_count_rows(counts: &[(Borough, u64)]) -> Vec<CategoryCountRow> {
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    counts
        .iter()
        .map(|(borough, count)| CategoryCountRow {
            borough: borough.to_string(),
            incidents: format_int(*count),
            share_pct: format_number(percent(*count, total), 2),
        })
        .collect()
}

pub fn risk_rows(ranked: &[CategorySummary]) -> Vec<RiskRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, s)| RiskRow {
            rank: idx + 1,
            borough: s.category.to_string(),
            total_incidents: format_int(s.total_count),
            severe_incidents: format_int(s.severe_count),
            unknown_severity: format_int(s.unknown_severity),
            severe_rate: format_number(s.severe_rate, 2),
            risk_score: format_number(s.risk_score, 2),
        })
        .collect()
}

pub fn yearly_rows(years: &[YearlyTotal]) -> Vec<YearlyRow> {
    years
        .iter()
        .map(|y| YearlyRow {
            year: y.year,
            incidents: format_int(y.incidents),
            severe: format_int(y.severe),
        })
        .collect()
}

pub fn hourly_rows(hours: &[u64; 24]) -> Vec<HourlyRow> {
    hours
        .iter()
        .enumerate()
        .map(|(h, &count)| HourlyRow {
            hour: format!("{h:02}:00"),
            incidents: count,
        })
        .collect()
}

pub fn generate_summary(
    data: &[IncidentRecord],
    load: &LoadReport,
    series: &[MonthlyCount],
    decomposition: Option<&Decomposition>,
) -> SummaryStats {
    let total_severe = data
        .iter()
        .filter(|r| r.severity == Severity::Severe)
        .count() as u64;
    let first_date = data.iter().map(|r| r.occur_date).min();
    let last_date = data.iter().map(|r| r.occur_date).max();
    SummaryStats {
        rows_read: load.total_rows,
        rows_kept: load.kept_rows,
        rows_dropped: load.dropped_rows,
        first_date: first_date.map(|d| d.to_string()),
        last_date: last_date.map(|d| d.to_string()),
        months: series.len(),
        total_severe,
        overall_severe_rate: percent(total_severe, data.len() as u64),
        decomposition_available: decomposition.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::decompose;
    use chrono::NaiveDate;

    #[test]
    fn decomposition_rows_blank_undefined_points() {
        let observed: Vec<f64> = (0..24).map(|i| (10 + i % 3) as f64).collect();
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let d = decompose(&observed, start).unwrap();
        let rows = decomposition_rows(&d);

        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].month, "2020-03");
        assert_eq!(rows[23].month, "2022-02");
        assert!(rows[0].trend.is_empty());
        assert!(rows[0].residual.is_empty());
        assert!(!rows[6].trend.is_empty());
        assert!(rows[18].trend.is_empty());
    }

    #[test]
    fn seasonal_rows_are_ranked_and_named() {
        let observed: Vec<f64> = (0..24).map(|i| if i % 12 == 7 { 20.0 } else { 8.0 }).collect();
        let d = decompose(&observed, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()).unwrap();
        let rows = seasonal_effect_rows(&d);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].month, "Aug");
        assert!(rows[0].effect.starts_with('+'));
    }

    #[test]
    fn category_shares_sum_to_hundred() {
        let rows = category_count_rows(&[(Borough::Brooklyn, 3), (Borough::Bronx, 1)]);
        assert_eq!(rows[0].share_pct, "75.00");
        assert_eq!(rows[1].share_pct, "25.00");
        assert_eq!(rows[0].borough, "BROOKLYN");
    }

    #[test]
    fn risk_rows_are_numbered_in_rank_order() {
        let ranked = vec![
            CategorySummary {
                category: Borough::Queens,
                total_count: 50,
                severe_count: 10,
                unknown_severity: 0,
                severe_rate: 20.0,
                risk_score: 40.0,
            },
            CategorySummary {
                category: Borough::Bronx,
                total_count: 1000,
                severe_count: 50,
                unknown_severity: 2,
                severe_rate: 5.0,
                risk_score: 10.0,
            },
        ];
        let rows = risk_rows(&ranked);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].risk_score, "40.00");
        assert_eq!(rows[1].total_incidents, "1,000");
        assert_eq!(rows[1].unknown_severity, "2");
    }

    #[test]
    fn hourly_rows_label_each_hour() {
        let mut hours = [0u64; 24];
        hours[21] = 7;
        let rows = hourly_rows(&hours);
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[21].hour, "21:00");
        assert_eq!(rows[21].incidents, 7);
        assert_eq!(rows[0].hour, "00:00");
    }
}
