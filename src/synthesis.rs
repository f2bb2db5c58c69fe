//! Harmonic synthesis: summing constituents into a water height.
//!
//! For each of a station's harmonic constants whose symbol the catalog
//! implements, the engine computes the equilibrium argument V0 from the
//! timestamp's astronomical parameters, applies the nodal correction
//! (f, u), and accumulates `f * amplitude * cos(V0 + u - G)` where G is the
//! stored Greenwich phase lag. Constituents the catalog does not carry are
//! skipped: station datasets legitimately reference supersets of any
//! implemented catalog.
//!
//! Everything here is a pure function of its inputs; identical inputs give
//! bit-identical outputs. The only fallible entry point is
//! [`predict_tide_series`], which validates the caller-supplied range and
//! interval before looping.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::astro::{self, normalize_degrees, AstronomicalParameters};
use crate::constituents::ConstituentCatalog;
use crate::nodal;
use crate::{Station, TidePrediction};

/// Default series resolution in minutes.
pub const DEFAULT_INTERVAL_MINUTES: i64 = 6;

/// Hard cap on series length; absurd ranges fail fast instead of exhausting
/// memory.
pub const MAX_SERIES_POINTS: i64 = 10_000_000;

/// Errors raised at the series boundary for caller contract violations.
///
/// Single-timestamp prediction is total and cannot fail; only a malformed
/// range or interval is rejected, before any synthesis work happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictionError {
    /// The requested range runs backwards.
    #[error("series end {end} precedes start {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The step must move time forward.
    #[error("interval must be a positive number of minutes, got {0}")]
    NonPositiveInterval(i64),

    /// Range/interval combination would produce an unreasonable number of
    /// points.
    #[error("series would hold {points} points, more than the {MAX_SERIES_POINTS} limit")]
    SeriesTooLong { points: i64 },
}

/// One constituent's term in a prediction, as returned by
/// [`constituent_contributions`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstituentContribution {
    /// Constituent symbol.
    pub symbol: String,
    /// Signed height contribution in meters; the full prediction is the sum
    /// of these.
    pub contribution_m: f64,
    /// Synthesis phase in degrees, normalized: V0 + u - G.
    pub phase_deg: f64,
    /// Stored station amplitude in meters, before nodal scaling.
    pub amplitude_m: f64,
    /// Nodal amplitude factor f applied to the stored amplitude.
    pub amplitude_factor: f64,
}

/// One constituent's synthesis term at the given astronomical parameters.
/// Returns (phase_deg, amplitude_factor, contribution_m).
fn constituent_term(
    constituent: &crate::constituents::Constituent,
    amplitude_m: f64,
    phase_lag_deg: f64,
    params: &AstronomicalParameters,
) -> (f64, f64, f64) {
    let v0 = constituent.equilibrium_argument_deg(params);
    let correction = nodal::nodal_correction(constituent.symbol, params.lunar_node);
    let phase = normalize_degrees(v0 + correction.phase_offset_deg - phase_lag_deg);
    let contribution =
        correction.amplitude_factor * amplitude_m * phase.to_radians().cos();
    (phase, correction.amplitude_factor, contribution)
}

/// Predicted height at fixed astronomical parameters. Shared core of the
/// public prediction functions; also lets tests freeze the astronomy.
fn predict_at_parameters(
    catalog: &ConstituentCatalog,
    station: &Station,
    params: &AstronomicalParameters,
) -> f64 {
    let mut height = 0.0;
    for harmonic in &station.constituents {
        // Unknown symbols are skipped, not errors.
        if let Some(constituent) = catalog.get(&harmonic.symbol) {
            let (_, _, contribution) = constituent_term(
                constituent,
                harmonic.amplitude_m,
                harmonic.phase_lag_deg,
                params,
            );
            height += contribution;
        }
    }
    height
}

/// Predict the water height at a station at one instant, in meters above
/// the station datum.
///
/// Pure and total over any finite timestamp. A station with an empty
/// constituent list predicts 0 everywhere.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use tide_predict_lib::config::Config;
/// use tide_predict_lib::constituents::ConstituentCatalog;
/// use tide_predict_lib::synthesis::predict_tide;
///
/// let station = Config::default().station.to_station();
/// let t = Utc.with_ymd_and_hms(2025, 7, 24, 12, 0, 0).unwrap();
/// let height = predict_tide(ConstituentCatalog::standard(), &station, t);
/// assert!(height.is_finite());
/// ```
pub fn predict_tide(
    catalog: &ConstituentCatalog,
    station: &Station,
    t: DateTime<Utc>,
) -> f64 {
    predict_at_parameters(catalog, station, &astro::parameters(t))
}

/// Predict the height using only the station constituents whose symbol is
/// in `symbols`.
///
/// Isolates a single constituent's or a family's contribution; with every
/// station symbol listed this equals [`predict_tide`].
pub fn predict_tide_from_constituents(
    catalog: &ConstituentCatalog,
    station: &Station,
    t: DateTime<Utc>,
    symbols: &[&str],
) -> f64 {
    let params = astro::parameters(t);
    let mut height = 0.0;
    for harmonic in &station.constituents {
        if !symbols.contains(&harmonic.symbol.as_str()) {
            continue;
        }
        if let Some(constituent) = catalog.get(&harmonic.symbol) {
            let (_, _, contribution) = constituent_term(
                constituent,
                harmonic.amplitude_m,
                harmonic.phase_lag_deg,
                &params,
            );
            height += contribution;
        }
    }
    height
}

/// Per-constituent breakdown of a prediction.
///
/// Same computation as [`predict_tide`], returned term by term instead of
/// summed; the contributions sum to the predicted height. Skipped (unknown)
/// symbols do not appear in the result.
pub fn constituent_contributions(
    catalog: &ConstituentCatalog,
    station: &Station,
    t: DateTime<Utc>,
) -> Vec<ConstituentContribution> {
    let params = astro::parameters(t);
    let mut contributions = Vec::with_capacity(station.constituents.len());
    for harmonic in &station.constituents {
        if let Some(constituent) = catalog.get(&harmonic.symbol) {
            let (phase, factor, contribution) = constituent_term(
                constituent,
                harmonic.amplitude_m,
                harmonic.phase_lag_deg,
                &params,
            );
            contributions.push(ConstituentContribution {
                symbol: harmonic.symbol.clone(),
                contribution_m: contribution,
                phase_deg: phase,
                amplitude_m: harmonic.amplitude_m,
                amplitude_factor: factor,
            });
        }
    }
    contributions
}

/// Predict a time-ascending series from `start` to `end` inclusive (subject
/// to step alignment) at `interval_minutes` resolution.
///
/// The whole series is materialized; at the call volumes this engine sees
/// (tens to low thousands of points) that is cheaper than streaming.
/// Astronomical parameters are recomputed for every point.
///
/// # Errors
/// Rejects `end < start`, a non-positive interval, and ranges that would
/// produce more than [`MAX_SERIES_POINTS`] points. Validation happens
/// before any synthesis work.
pub fn predict_tide_series(
    catalog: &ConstituentCatalog,
    station: &Station,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_minutes: i64,
) -> Result<Vec<TidePrediction>, PredictionError> {
    if interval_minutes <= 0 {
        return Err(PredictionError::NonPositiveInterval(interval_minutes));
    }
    if end < start {
        return Err(PredictionError::EndBeforeStart { start, end });
    }

    let span_minutes = (end - start).num_minutes();
    let points = span_minutes / interval_minutes + 1;
    if points > MAX_SERIES_POINTS {
        return Err(PredictionError::SeriesTooLong { points });
    }

    let step = Duration::minutes(interval_minutes);
    let mut series = Vec::with_capacity(points as usize);
    let mut t = start;
    while t <= end {
        series.push(TidePrediction {
            timestamp: t,
            height_m: predict_tide(catalog, station, t),
        });
        t = t + step;
    }
    Ok(series)
}
