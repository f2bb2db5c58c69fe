//! # End-to-End Engine Test Suite
//!
//! Exercises the full prediction pipeline the way the binary uses it:
//! configuration to station record to synthesized series to derived
//! analytics. Tests run against the built-in default station (Portland, ME)
//! so they are deterministic and need no network or fixtures.

use chrono::{Duration, TimeZone, Utc};
use tide_predict_lib::analytics::{find_extremes, spring_neap_indicator, tidal_range};
use tide_predict_lib::config::Config;
use tide_predict_lib::constituents::ConstituentCatalog;
use tide_predict_lib::synthesis::{
    constituent_contributions, predict_tide, predict_tide_series,
};
use tide_predict_lib::{ExtremeKind, Station, TidePrediction};

fn default_station() -> Station {
    Config::default().station.to_station()
}

/// A fixed instant keeps every test reproducible.
fn reference_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 24, 12, 0, 0).unwrap()
}

/// The binary's default window: 24 hours of 10-minute samples.
fn full_window_series() -> Vec<TidePrediction> {
    let catalog = ConstituentCatalog::standard();
    let station = default_station();
    let now = reference_time();
    predict_tide_series(
        catalog,
        &station,
        now - Duration::hours(12),
        now + Duration::hours(12),
        10,
    )
    .expect("window is a valid range")
}

#[test]
fn full_window_has_expected_shape() {
    let series = full_window_series();

    // 24 hours at 10-minute intervals, both ends inclusive
    assert_eq!(series.len(), 145, "24 h at 10 min should be 145 samples");

    for window in series.windows(2) {
        assert!(
            window[0].timestamp < window[1].timestamp,
            "series must be strictly time-ascending"
        );
        assert_eq!(
            window[1].timestamp - window[0].timestamp,
            Duration::minutes(10),
            "samples must be evenly spaced"
        );
    }
}

#[test]
fn heights_stay_within_the_station_amplitude_budget() {
    // No prediction can exceed the sum of amplitudes times the largest
    // nodal factor; 1.5 is a generous envelope over the implemented table.
    let station = default_station();
    let amplitude_budget: f64 = station.constituents.iter().map(|c| c.amplitude_m).sum();
    for point in full_window_series() {
        assert!(
            point.height_m.abs() <= amplitude_budget * 1.5,
            "height {} m at {} exceeds the plausible envelope {}",
            point.height_m,
            point.timestamp,
            amplitude_budget * 1.5
        );
    }
}

#[test]
fn semidiurnal_station_shows_two_tides_a_day() {
    // Portland is M2-dominated: expect a high roughly every 12.4 hours.
    let catalog = ConstituentCatalog::standard();
    let station = default_station();
    let start = reference_time();
    let series = predict_tide_series(
        catalog,
        &station,
        start,
        start + Duration::hours(48),
        10,
    )
    .expect("valid range");

    let extremes = find_extremes(&series);
    let highs = extremes
        .iter()
        .filter(|e| e.kind == ExtremeKind::High)
        .count();
    let lows = extremes
        .iter()
        .filter(|e| e.kind == ExtremeKind::Low)
        .count();

    assert!(
        (3..=5).contains(&highs),
        "expected 3-5 high waters in 48 h, found {highs}"
    );
    assert!(
        (3..=5).contains(&lows),
        "expected 3-5 low waters in 48 h, found {lows}"
    );

    // Highs and lows alternate in a sane tidal record.
    for window in extremes.windows(2) {
        assert_ne!(
            window[0].kind, window[1].kind,
            "consecutive extremes should alternate"
        );
    }
}

#[test]
fn extreme_heights_straddle_the_series_mean() {
    let series = full_window_series();
    let mean: f64 =
        series.iter().map(|p| p.height_m).sum::<f64>() / series.len() as f64;
    for extreme in find_extremes(&series) {
        match extreme.kind {
            ExtremeKind::High => assert!(
                extreme.height_m > mean,
                "high water below the series mean"
            ),
            ExtremeKind::Low => assert!(
                extreme.height_m < mean,
                "low water above the series mean"
            ),
        }
    }
}

#[test]
fn decomposition_invariant_holds_across_the_window() {
    let catalog = ConstituentCatalog::standard();
    let station = default_station();
    for offset_hours in [0, 3, 7, 11, 16, 23] {
        let t = reference_time() + Duration::hours(offset_hours);
        let total = predict_tide(catalog, &station, t);
        let sum: f64 = constituent_contributions(catalog, &station, t)
            .iter()
            .map(|c| c.contribution_m)
            .sum();
        assert!(
            (total - sum).abs() < 1e-9,
            "contributions diverge from prediction at +{offset_hours} h"
        );
    }
}

#[test]
fn tidal_range_contains_every_window_sample_near_its_center() {
    let catalog = ConstituentCatalog::standard();
    let station = default_station();
    let now = reference_time();
    let range = tidal_range(catalog, &station, now);

    // The range window (25 h) covers the chart window (24 h) when both are
    // centered on the same instant.
    for point in full_window_series() {
        assert!(
            point.height_m >= range.min_height_m - 1e-9
                && point.height_m <= range.max_height_m + 1e-9,
            "sample at {} outside the 25 h envelope",
            point.timestamp
        );
    }
}

#[test]
fn repeated_series_generation_is_deterministic() {
    let first = full_window_series();
    let second = full_window_series();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(
            a.height_m.to_bits(),
            b.height_m.to_bits(),
            "heights must match bit-for-bit at {}",
            a.timestamp
        );
    }
}

#[test]
fn spring_neap_indicator_matches_observed_range_trend() {
    // Across a synodic month, days with a high indicator should show a
    // larger tidal range than days with a low indicator. The station is
    // restricted to M2 and S2 so the perigean (N2) beat cannot mask the
    // spring/neap envelope.
    let catalog = ConstituentCatalog::standard();
    let mut station = default_station();
    station
        .constituents
        .retain(|c| c.symbol == "M2" || c.symbol == "S2");
    let start = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();

    let mut best_spring: Option<(f64, f64)> = None;
    let mut best_neap: Option<(f64, f64)> = None;
    for day in 0..29 {
        let t = start + Duration::days(day);
        let indicator = spring_neap_indicator(t);
        let range = tidal_range(catalog, &station, t);
        let span = range.max_height_m - range.min_height_m;
        if best_spring.map(|(i, _)| indicator > i).unwrap_or(true) {
            best_spring = Some((indicator, span));
        }
        if best_neap.map(|(i, _)| indicator < i).unwrap_or(true) {
            best_neap = Some((indicator, span));
        }
    }

    let (spring_indicator, spring_span) = best_spring.expect("29 samples");
    let (neap_indicator, neap_span) = best_neap.expect("29 samples");
    assert!(spring_indicator > 0.9, "no near-spring day in a month");
    assert!(neap_indicator < -0.9, "no near-neap day in a month");
    assert!(
        spring_span > neap_span,
        "spring range {spring_span} should exceed neap range {neap_span}"
    );
}

#[test]
fn prediction_series_serializes_for_export() {
    // Downstream layers persist series as JSON; the value types must
    // round-trip losslessly.
    let series = full_window_series();
    let encoded = serde_json::to_vec(&series).expect("series serializes");
    let decoded: Vec<TidePrediction> =
        serde_json::from_slice(&encoded).expect("series deserializes");
    assert_eq!(series.len(), decoded.len());
    for (a, b) in series.iter().zip(decoded.iter()) {
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.height_m, b.height_m);
    }
}

#[test]
fn custom_station_with_superset_constituents_predicts() {
    // A station carrying symbols beyond the catalog must still predict from
    // the implemented subset.
    let catalog = ConstituentCatalog::standard();
    let mut config = Config::default();
    config.station.constituents.push(tide_predict_lib::HarmonicConstant {
        symbol: "3MS8".to_string(),
        amplitude_m: 0.5,
        phase_lag_deg: 12.0,
    });
    let station = config.station.to_station();

    let t = reference_time();
    let height = predict_tide(catalog, &station, t);
    assert!(height.is_finite());

    let contributions = constituent_contributions(catalog, &station, t);
    assert!(
        contributions.iter().all(|c| c.symbol != "3MS8"),
        "unimplemented symbol must be skipped, not synthesized"
    );
}
