// Classical additive seasonal decomposition of a monthly series.
//
// `observed = trend + seasonal + residual`, with the trend estimated by a
// centered moving average over one period and the seasonal component taken
// as the normalized per-calendar-month mean of the detrended series.

use crate::error::{ReportError, Result};
use crate::types::{Decomposition, MonthlyCount};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Months per seasonal cycle.
pub const PERIOD: usize = 12;

/// Decomposes a zero-filled monthly count series.
pub fn decompose_monthly(series: &[MonthlyCount]) -> Result<Decomposition> {
    let Some(first) = series.first() else {
        return Err(ReportError::InsufficientData {
            len: 0,
            required: 2 * PERIOD,
        });
    };
    let observed: Vec<f64> = series.iter().map(|m| m.count as f64).collect();
    decompose(&observed, first.month)
}

/// Decomposes `observed`, whose first point falls in the month of `start`.
///
/// # Errors
///
/// [`ReportError::InsufficientData`] if the series is shorter than two full
/// periods, [`ReportError::InvalidInput`] if any value is negative or not
/// finite.
pub fn decompose(observed: &[f64], start: NaiveDate) -> Result<Decomposition> {
    let n = observed.len();
    if n < 2 * PERIOD {
        return Err(ReportError::InsufficientData {
            len: n,
            required: 2 * PERIOD,
        });
    }
    if let Some((index, &value)) = observed
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(ReportError::InvalidInput { index, value });
    }

    let offset = start.month0() as usize;
    let position = |i: usize| (offset + i) % PERIOD;

    let trend = centered_moving_average(observed, PERIOD);

    let mut sums = [0.0f64; PERIOD];
    let mut counts = [0usize; PERIOD];
    for (i, t) in trend.iter().enumerate() {
        if let Some(t) = t {
            sums[position(i)] += observed[i] - t;
            counts[position(i)] += 1;
        }
    }
    // n >= 2P leaves at least P consecutive defined trend points, so every
    // calendar position has at least one detrended value.
    let raw: Vec<f64> = sums
        .iter()
        .zip(counts.iter())
        .map(|(s, &c)| if c == 0 { 0.0 } else { s / c as f64 })
        .collect();
    let mean = raw.iter().sum::<f64>() / PERIOD as f64;
    let figures: Vec<f64> = raw.iter().map(|r| r - mean).collect();

    let seasonal: Vec<f64> = (0..n).map(|i| figures[position(i)]).collect();
    let residual: Vec<Option<f64>> = trend
        .iter()
        .enumerate()
        .map(|(i, t)| t.map(|t| observed[i] - t - seasonal[i]))
        .collect();

    Ok(Decomposition {
        start,
        period: PERIOD,
        observed: observed.to_vec(),
        trend,
        seasonal,
        residual,
        figures,
    })
}

/// Centered moving average with window `period`.
///
/// For an even period the window spans `period + 1` points with half weight
/// on both ends, keeping it centered on integer indices. The first and last
/// `period / 2` points are `None`.
pub fn centered_moving_average(x: &[f64], period: usize) -> Vec<Option<f64>> {
    let half = period / 2;
    let mut out = vec![None; x.len()];
    if period == 0 || x.len() < 2 * half + 1 {
        return out;
    }
    for i in half..x.len() - half {
        let window = &x[i - half..=i + half];
        let sum: f64 = if period % 2 == 0 {
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            inner + 0.5 * (window[0] + window[window.len() - 1])
        } else {
            window.iter().sum()
        };
        out[i] = Some(sum / period as f64);
    }
    out
}

impl Decomposition {
    /// Calendar month (1-12) of point `i`.
    pub fn month_of(&self, i: usize) -> u32 {
        ((self.start.month0() as usize + i) % self.period) as u32 + 1
    }

    /// Date of point `i`.
    pub fn date_of(&self, i: usize) -> Option<NaiveDate> {
        self.start
            .checked_add_months(chrono::Months::new(u32::try_from(i).ok()?))
    }

    /// Seasonal figures as `(month, effect)`, largest magnitude first.
    /// Equal magnitudes keep calendar order.
    pub fn ranked_effects(&self) -> Vec<(u32, f64)> {
        let mut effects: Vec<(u32, f64)> = self
            .figures
            .iter()
            .enumerate()
            .map(|(k, &e)| (k as u32 + 1, e))
            .collect();
        effects.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(Ordering::Equal));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn jan(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
    }

    const EXAMPLE: [f64; 24] = [
        10.0, 12.0, 9.0, 11.0, 10.0, 13.0, 9.0, 12.0, 11.0, 10.0, 12.0, 14.0, //
        11.0, 13.0, 10.0, 12.0, 11.0, 14.0, 10.0, 13.0, 12.0, 11.0, 13.0, 15.0,
    ];

    #[test]
    fn trend_is_undefined_at_both_ends() {
        let d = decompose(&EXAMPLE, jan(2019)).unwrap();
        for i in 0..24 {
            let defined = (6..=17).contains(&i);
            assert_eq!(d.trend[i].is_some(), defined, "trend at {i}");
            assert_eq!(d.residual[i].is_some(), defined, "residual at {i}");
        }
    }

    #[test]
    fn trend_uses_half_weighted_end_points() {
        let d = decompose(&EXAMPLE, jan(2019)).unwrap();
        // (0.5 * 10 + sum(x[1..=11]) + 0.5 * 11) / 12
        let t6 = d.trend[6].unwrap();
        assert!((t6 - 11.125).abs() < EPS, "trend[6] = {t6}");
    }

    #[test]
    fn additive_reconstruction_holds() {
        let d = decompose(&EXAMPLE, jan(2019)).unwrap();
        for i in 0..24 {
            if let (Some(t), Some(r)) = (d.trend[i], d.residual[i]) {
                let rebuilt = t + d.seasonal[i] + r;
                assert!((d.observed[i] - rebuilt).abs() < EPS, "index {i}");
            }
        }
    }

    #[test]
    fn seasonal_is_periodic_and_normalized() {
        let d = decompose(&EXAMPLE, jan(2019)).unwrap();
        for i in 0..24 - PERIOD {
            assert_eq!(d.seasonal[i], d.seasonal[i + PERIOD]);
        }
        assert_eq!(d.figures.len(), PERIOD);
        assert!(d.figures.iter().sum::<f64>().abs() < EPS);
    }

    #[test]
    fn recovers_linear_trend_and_pattern_exactly() {
        let pattern = [3.0, -1.0, 2.0, 0.0, -4.0, 1.0, 5.0, -2.0, 0.5, -0.5, -3.0, -1.0];
        assert!(pattern.iter().sum::<f64>().abs() < EPS);
        let observed: Vec<f64> = (0..48)
            .map(|i| 100.0 + 0.75 * i as f64 + pattern[i % 12])
            .collect();

        let d = decompose(&observed, jan(2015)).unwrap();
        for (k, p) in pattern.iter().enumerate() {
            assert!((d.figures[k] - p).abs() < 1e-9, "figure {k}");
        }
        for i in 6..42 {
            let t = d.trend[i].unwrap();
            assert!((t - (100.0 + 0.75 * i as f64)).abs() < 1e-9, "trend {i}");
            assert!(d.residual[i].unwrap().abs() < 1e-9, "residual {i}");
        }
    }

    #[test]
    fn figures_are_indexed_by_calendar_month() {
        // Series starting in July: a spike every December.
        let start = NaiveDate::from_ymd_opt(2018, 7, 1).unwrap();
        let observed: Vec<f64> = (0..36)
            .map(|i| if (6 + i) % 12 == 11 { 30.0 } else { 10.0 })
            .collect();
        let d = decompose(&observed, start).unwrap();

        let (top_month, top_effect) = d.ranked_effects()[0];
        assert_eq!(top_month, 12);
        assert!(top_effect > 0.0);
        assert_eq!(d.month_of(0), 7);
        assert_eq!(d.month_of(5), 12);
        assert_eq!(d.date_of(6), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(d.seasonal[5], d.figures[11]);
    }

    #[test]
    fn ranked_effects_sorted_by_magnitude() {
        let d = decompose(&EXAMPLE, jan(2019)).unwrap();
        let ranked = d.ranked_effects();
        assert_eq!(ranked.len(), PERIOD);
        for pair in ranked.windows(2) {
            assert!(pair[0].1.abs() >= pair[1].1.abs());
        }
    }

    #[test]
    fn short_series_is_insufficient() {
        let err = decompose(&EXAMPLE[..23], jan(2019)).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InsufficientData { len: 23, required: 24 }
        ));
        assert!(matches!(
            decompose_monthly(&[]),
            Err(ReportError::InsufficientData { len: 0, .. })
        ));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let mut bad = EXAMPLE;
        bad[4] = -1.0;
        let err = decompose(&bad, jan(2019)).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput { index: 4, .. }));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for (index, value) in [(0, f64::NAN), (11, f64::INFINITY), (23, f64::NEG_INFINITY)] {
            let mut bad = EXAMPLE;
            bad[index] = value;
            match decompose(&bad, jan(2019)) {
                Err(ReportError::InvalidInput { index: at, .. }) => assert_eq!(at, index),
                other => panic!("value {value} at {index}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn monthly_wrapper_uses_first_month_as_start() {
        let start = NaiveDate::from_ymd_opt(2006, 1, 1).unwrap();
        let series: Vec<MonthlyCount> = EXAMPLE
            .iter()
            .enumerate()
            .map(|(i, &c)| MonthlyCount {
                month: start.checked_add_months(chrono::Months::new(i as u32)).unwrap(),
                count: c as u64,
            })
            .collect();
        let d = decompose_monthly(&series).unwrap();
        assert_eq!(d.start, start);
        assert_eq!(d.observed, EXAMPLE.to_vec());
    }

    #[test]
    fn odd_window_moving_average() {
        let ma = centered_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(ma, vec![None, Some(2.0), Some(3.0), Some(4.0), None]);
    }
}
