use crate::types::{CategorySummary, CategoryTally};
use crate::util::percent;

/// Scores each category as `severe_rate * weight` and ranks them, highest
/// score first.
///
/// `severe_rate` is a percentage and is 0 for a category with no incidents.
/// The sort is stable, so equal scores keep the order of `tallies`.
pub fn rank_by_risk(tallies: &[CategoryTally], weight: f64) -> Vec<CategorySummary> {
    let mut ranked: Vec<CategorySummary> = tallies
        .iter()
        .map(|t| {
            let severe_rate = percent(t.severe_count, t.total_count);
            CategorySummary {
                category: t.category,
                total_count: t.total_count,
                severe_count: t.severe_count,
                unknown_severity: t.unknown_severity,
                severe_rate,
                risk_score: severe_rate * weight,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    ranked
}
