//! # Tide Predictor Application Entry Point
//!
//! This binary crate wires the harmonic engine to the terminal: it loads a
//! station from configuration, predicts a window of heights around the
//! current time, renders the ASCII chart, and summarizes upcoming high/low
//! water together with the spring/neap and lunar-phase indicators.

// Test modules
#[cfg(test)]
mod tests;

// Re-export library types for internal use
pub use tide_predict_lib::config::Config;

use std::env;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tide_predict_lib::analytics;
use tide_predict_lib::constituents::ConstituentCatalog;
use tide_predict_lib::renderer::{draw_ascii, format_height};
use tide_predict_lib::synthesis;
use tide_predict_lib::{ExtremeKind, TideExtreme};

/// Describe the spring/neap indicator for the summary line.
fn describe_spring_neap(indicator: f64) -> &'static str {
    if indicator > 0.7 {
        "spring tides (large range)"
    } else if indicator < -0.7 {
        "neap tides (small range)"
    } else {
        "between spring and neap"
    }
}

/// Describe the lunar phase fraction (0 = new, 0.5 = full) in octants.
fn describe_lunar_phase(phase: f64) -> &'static str {
    match (phase * 8.0).floor() as i64 {
        0 => "new moon",
        1 => "waxing crescent",
        2 => "first quarter",
        3 => "waxing gibbous",
        4 => "full moon",
        5 => "waning gibbous",
        6 => "last quarter",
        _ => "waning crescent",
    }
}

fn print_extremes(extremes: &[TideExtreme], now: DateTime<Utc>) {
    if extremes.is_empty() {
        println!("No high/low water inside the window.");
        return;
    }
    println!("High/low water (UTC):");
    for extreme in extremes {
        let label = match extreme.kind {
            ExtremeKind::High => "HIGH",
            ExtremeKind::Low => "LOW ",
        };
        let marker = if extreme.timestamp >= now { "next" } else { "    " };
        println!(
            "  {} {}  {} m  {}",
            label,
            extreme.timestamp.format("%Y-%m-%d %H:%M"),
            format_height(extreme.height_m),
            marker
        );
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Optional argument: path to an alternative config file
    let config = match env::args().nth(1) {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    let station = config.station.to_station();
    let catalog = ConstituentCatalog::standard();
    let now = Utc::now();

    let window = Duration::hours(config.prediction.window_hours);
    let series = synthesis::predict_tide_series(
        catalog,
        &station,
        now - window,
        now + window,
        config.prediction.interval_minutes,
    )
    .context("failed to generate prediction series")?;

    println!(
        "Tide predictions for {} (station {}, heights in m above {})",
        station.name, station.id, station.datum
    );
    println!();
    draw_ascii(&series, now);
    println!();

    let current = synthesis::predict_tide(catalog, &station, now);
    let range = analytics::tidal_range(catalog, &station, now);
    println!(
        "Current height: {} m  (25 h envelope: {} to {} m)",
        format_height(current),
        format_height(range.min_height_m),
        format_height(range.max_height_m)
    );
    println!();

    print_extremes(&analytics::find_extremes(&series), now);
    println!();

    let indicator = analytics::spring_neap_indicator(now);
    let phase = analytics::lunar_phase(now);
    println!(
        "Sun-Moon alignment {:+.2}: {}",
        indicator,
        describe_spring_neap(indicator)
    );
    println!(
        "Lunar phase {:.2}: {}",
        phase,
        describe_lunar_phase(phase)
    );

    Ok(())
}
