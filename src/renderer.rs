//! # Prediction Series Rendering
//!
//! Renders a tide prediction series as an ASCII chart on stdout: height
//! labels on a Y axis, one column per sample, an `X` marker at the sample
//! nearest "now", and an hourly time ruler underneath. Intended for
//! terminal use and for eyeballing engine output without any display
//! hardware.

use chrono::{DateTime, Utc};

use crate::TidePrediction;

const ROWS: usize = 20;
const Y_AXIS_WIDTH: usize = 7;

/// Format a height in meters for axis labels and summaries, with explicit
/// sign and two decimals; values within half a millimeter of zero render
/// as " 0".
pub fn format_height(height_m: f64) -> String {
    if height_m.abs() < 5e-4 {
        " 0".to_string()
    } else {
        format!("{:+.2}", height_m)
    }
}

/// Render a prediction series to ASCII terminal.
///
/// `now` selects the column highlighted with the `X` marker; samples are
/// plotted left to right in series order. Series with fewer than two
/// points, or with no height variation at all, are reported in a single
/// line instead of a degenerate grid.
pub fn draw_ascii(series: &[TidePrediction], now: DateTime<Utc>) {
    let sample_count = series.len();
    if sample_count < 2 {
        println!("(series too short to chart)");
        return;
    }

    let (min_height, max_height) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p.height_m), max.max(p.height_m))
        });
    let span = max_height - min_height;
    if span < 1e-9 {
        println!("(flat series at {} m)", format_height(min_height));
        return;
    }

    let height_to_row = |height_m: f64| {
        let normalized = (height_m - min_height) / span;
        ((1.0 - normalized) * (ROWS as f64 - 1.0)).round() as usize
    };

    let mut grid = vec![vec![' '; sample_count + Y_AXIS_WIDTH]; ROWS];

    // Y-axis labels at regular height steps
    let step = if span > 2.0 { 0.5 } else { 0.25 };
    let mut label_height = (min_height / step).floor() * step;
    while label_height <= max_height {
        if label_height >= min_height {
            let row = height_to_row(label_height);
            let label = format!("{:<width$}", format_height(label_height), width = Y_AXIS_WIDTH - 1);
            for (i, ch) in label.chars().enumerate() {
                if i < Y_AXIS_WIDTH - 1 {
                    grid[row][i] = ch;
                }
            }
        }
        label_height += step;
    }
    for row in grid.iter_mut() {
        row[Y_AXIS_WIDTH - 1] = '│';
    }

    // Column nearest "now" gets the marker
    let now_index = series
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.timestamp - now).num_seconds().abs())
        .map(|(i, _)| i)
        .unwrap_or(sample_count / 2);

    for (column, point) in series.iter().enumerate() {
        let row = height_to_row(point.height_m);
        let grid_column = column + Y_AXIS_WIDTH;
        grid[row][grid_column] = if column == now_index { 'X' } else { '•' };
    }

    for row in grid {
        println!("{}", row.into_iter().collect::<String>());
    }

    // Time markers below the chart, one tick per hour of series time
    let interval_minutes = (series[1].timestamp - series[0].timestamp)
        .num_minutes()
        .max(1);
    let ticks_per_hour = (60 / interval_minutes).max(1) as usize;
    let padding = " ".repeat(Y_AXIS_WIDTH);
    let time_markers: String = (0..sample_count)
        .map(|i| if i % ticks_per_hour == 0 { '|' } else { ' ' })
        .collect();
    println!("{}{}", padding, time_markers);

    // Time labels: window edges relative to the marked column
    let span_minutes = (series[sample_count - 1].timestamp - series[0].timestamp).num_minutes();
    let half_hours = span_minutes / 120;
    let left_label = format!("-{}h", half_hours);
    let right_label = format!("+{}h", half_hours);
    let now_text = "Now";
    let now_offset = now_text.len() / 2;
    let left_width = now_index.saturating_sub(now_offset).max(left_label.len());
    let left_part = format!("{:<width$}", left_label, width = left_width);
    let right_part = format!(
        "{:>width$}",
        right_label,
        width = sample_count.saturating_sub(left_width + now_text.len())
    );
    println!("{}{}{}{}", padding, left_part, now_text, right_part);
}
