// Count-based aggregations over the cleaned table.
//
// Every series produced here is complete: buckets with no incidents are
// present with a zero count.

use crate::types::{Borough, CategoryTally, IncidentRecord, MonthlyCount, Severity, YearlyTotal};
use crate::util::{first_of_month, month_index, next_month};
use chrono::{Datelike, Timelike};
use std::collections::{BTreeMap, HashMap};

/// Incidents per month, ascending, with every month between the first and
/// last observed month present.
pub fn monthly_counts(data: &[IncidentRecord]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
    for r in data {
        *counts.entry(first_of_month(r.occur_date)).or_insert(0) += 1;
    }
    let (Some((&first, _)), Some((&last, _))) = (counts.first_key_value(), counts.last_key_value())
    else {
        return Vec::new();
    };

    let span = month_index(last) - month_index(first) + 1;
    let mut series = Vec::with_capacity(usize::try_from(span).unwrap_or(0));
    let mut month = first;
    while month <= last {
        series.push(MonthlyCount {
            month,
            count: counts.get(&month).copied().unwrap_or(0),
        });
        match next_month(month) {
            Some(next) => month = next,
            None => break,
        }
    }
    series
}

/// Per-borough totals in first-encounter order.
pub fn category_tallies(data: &[IncidentRecord]) -> Vec<CategoryTally> {
    let mut index: HashMap<Borough, usize> = HashMap::new();
    let mut tallies: Vec<CategoryTally> = Vec::new();
    for r in data {
        let i = *index.entry(r.borough).or_insert_with(|| {
            tallies.push(CategoryTally {
                category: r.borough,
                total_count: 0,
                severe_count: 0,
                unknown_severity: 0,
            });
            tallies.len() - 1
        });
        let t = &mut tallies[i];
        t.total_count += 1;
        match r.severity {
            Severity::Severe => t.severe_count += 1,
            Severity::Unknown => t.unknown_severity += 1,
            Severity::NotSevere => {}
        }
    }
    tallies
}

/// Incidents per borough, most incidents first; ties keep encounter order.
pub fn category_counts(data: &[IncidentRecord]) -> Vec<(Borough, u64)> {
    let mut counts: Vec<(Borough, u64)> = category_tallies(data)
        .into_iter()
        .map(|t| (t.category, t.total_count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Incidents and severe incidents per calendar year, zero-filled.
pub fn yearly_totals(data: &[IncidentRecord]) -> Vec<YearlyTotal> {
    let mut by_year: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for r in data {
        let e = by_year.entry(r.occur_date.year()).or_insert((0, 0));
        e.0 += 1;
        if r.severity == Severity::Severe {
            e.1 += 1;
        }
    }
    let (Some(&first), Some(&last)) = (by_year.keys().next(), by_year.keys().next_back()) else {
        return Vec::new();
    };
    (first..=last)
        .map(|year| {
            let (incidents, severe) = by_year.get(&year).copied().unwrap_or((0, 0));
            YearlyTotal {
                year,
                incidents,
                severe,
            }
        })
        .collect()
}

/// Incident counts per hour of day, index 0 = midnight.
pub fn hourly_profile(data: &[IncidentRecord]) -> [u64; 24] {
    let mut hours = [0u64; 24];
    for r in data {
        hours[r.occur_time.hour() as usize] += 1;
    }
    hours
}
