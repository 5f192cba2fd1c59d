// Plain-text chart rendering for the report artifacts.

use crate::types::Decomposition;
use std::fmt::Write;

const BAR_WIDTH: usize = 50;
const PLOT_HEIGHT: usize = 10;

/// Horizontal bar chart. Bars scale to the largest magnitude; negative values
/// are drawn with `-` instead of `#`.
pub fn bar_chart(title: &str, items: &[(String, f64)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    if items.is_empty() {
        let _ = writeln!(out, "(no data)");
        return out;
    }
    let label_width = items.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = items.iter().map(|(_, v)| v.abs()).fold(0.0f64, f64::max);
    for (label, value) in items {
        let len = if max > 0.0 {
            ((value.abs() / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let glyph = if *value < 0.0 { "-" } else { "#" };
        let _ = writeln!(
            out,
            "{label:<label_width$} | {} {value:.2}",
            glyph.repeat(len)
        );
    }
    out
}

/// Point plot of a series, one column per point. `None` points are left blank.
pub fn line_chart(title: &str, values: &[Option<f64>], first_label: &str, last_label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let defined: Vec<f64> = values.iter().flatten().copied().collect();
    if defined.is_empty() {
        let _ = writeln!(out, "(no data)");
        return out;
    }
    let min = defined.iter().copied().fold(f64::INFINITY, f64::min);
    let max = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let row_of = |v: f64| -> usize {
        if range.abs() < f64::EPSILON {
            PLOT_HEIGHT / 2
        } else {
            (((max - v) / range) * (PLOT_HEIGHT - 1) as f64).round() as usize
        }
    };

    let mut grid = vec![vec![' '; values.len()]; PLOT_HEIGHT];
    for (col, v) in values.iter().enumerate() {
        if let Some(v) = v {
            grid[row_of(*v).min(PLOT_HEIGHT - 1)][col] = '*';
        }
    }

    let axis = format!("{max:.1}").len().max(format!("{min:.1}").len());
    for (r, row) in grid.iter().enumerate() {
        let label = match r {
            0 => format!("{max:.1}"),
            r if r == PLOT_HEIGHT - 1 => format!("{min:.1}"),
            _ => String::new(),
        };
        let line: String = row.iter().collect();
        let _ = writeln!(out, "{label:>axis$} |{}", line.trim_end());
    }
    let _ = writeln!(out, "{:>axis$} +{}", "", "-".repeat(values.len()));
    let gap = values
        .len()
        .saturating_sub(first_label.len() + last_label.len());
    let _ = writeln!(out, "{:>axis$}  {first_label}{}{last_label}", "", " ".repeat(gap));
    out
}

/// Four stacked panels: observed, trend, seasonal, residual.
pub fn decomposition_panel(d: &Decomposition) -> String {
    let first = d
        .date_of(0)
        .map(|m| m.format("%Y-%m").to_string())
        .unwrap_or_default();
    let last = d
        .date_of(d.observed.len().saturating_sub(1))
        .map(|m| m.format("%Y-%m").to_string())
        .unwrap_or_default();

    let observed: Vec<Option<f64>> = d.observed.iter().copied().map(Some).collect();
    let seasonal: Vec<Option<f64>> = d.seasonal.iter().copied().map(Some).collect();

    let mut out = String::from("Additive decomposition of monthly incidents\n\n");
    out.push_str(&line_chart("Observed", &observed, &first, &last));
    out.push('\n');
    out.push_str(&line_chart("Trend", &d.trend, &first, &last));
    out.push('\n');
    out.push_str(&line_chart("Seasonal", &seasonal, &first, &last));
    out.push('\n');
    out.push_str(&line_chart("Residual", &d.residual, &first, &last));
    out
}
