//! # Tide Predictor Core Library
//!
//! This library implements a harmonic tide prediction engine: a coastal
//! location's tidal behavior is modeled as a fixed set of sinusoidal
//! constituents, each tied to an astronomical cycle (lunar, solar, nodal).
//! Given a station's harmonic constants, the engine predicts water height at
//! any instant, generates time series, and derives analytics on top of them
//! (high/low water, tidal range, spring/neap and lunar-phase indicators).
//!
//! ## Pipeline
//!
//! 1. **Astronomical parameters** ([`astro`]): a timestamp is converted into
//!    six angles (hour angle, lunar/solar mean longitudes, lunar
//!    perigee/node, solar perigee) via Julian-century polynomials.
//! 2. **Catalog lookup** ([`constituents`]): each constituent's Doodson
//!    multipliers turn those angles into its equilibrium argument V0.
//! 3. **Nodal correction** ([`nodal`]): the 18.6-year lunar nodal cycle
//!    scales amplitude (f) and offsets phase (u) per constituent family.
//! 4. **Synthesis** ([`synthesis`]): `f * amplitude * cos(V0 + u - G)`
//!    summed over the station's constituents is the predicted height.
//! 5. **Analytics** ([`analytics`]): extrema detection, tidal range and
//!    spring/neap indicators built on the synthesized series.
//!
//! ## Design Properties
//!
//! - **Pure functions**: every operation is a pure function of its inputs
//!   and the immutable constituent catalog. No engine state, no I/O, no
//!   locking; calls are safe from any number of threads.
//! - **Graceful degradation**: station data may reference constituents the
//!   catalog does not carry (silently skipped), and constituents outside the
//!   nodal-correction table get a neutral factor. Real station datasets
//!   routinely exceed any finite implemented catalog.
//! - **Fresh astronomy per timestamp**: astronomical parameters are
//!   continuous functions of time and are recomputed for every point;
//!   nothing is cached between calls.
//!
//! ## Core Types
//!
//! - [`Station`] / [`HarmonicConstant`]: the read-only station record with
//!   its per-constituent amplitude/phase pairs.
//! - [`TidePrediction`]: one (timestamp, height) point of a series.
//! - [`TideExtreme`]: a detected high or low water event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod analytics;
pub mod astro;
pub mod config;
pub mod constituents;
pub mod nodal;
pub mod renderer;
pub mod synthesis;

/// A predicted water height at a specific instant.
///
/// The atomic unit of a prediction series. Heights are in meters relative to
/// the station's vertical datum; timestamps are UTC.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use tide_predict_lib::TidePrediction;
///
/// let point = TidePrediction {
///     timestamp: Utc.with_ymd_and_hms(2025, 7, 24, 12, 0, 0).unwrap(),
///     height_m: 1.42,
/// };
/// assert!(point.height_m > 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TidePrediction {
    /// Instant of the prediction (UTC).
    pub timestamp: DateTime<Utc>,
    /// Predicted height in meters above the station datum.
    pub height_m: f64,
}

/// Whether a detected extreme is a high water or a low water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremeKind {
    High,
    Low,
}

/// A local extreme (high or low water) detected in a prediction series.
///
/// Exists only as a computed artifact of [`analytics::find_extremes`]; it is
/// never persisted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideExtreme {
    /// Instant of the extreme (UTC), aligned to the series grid.
    pub timestamp: DateTime<Utc>,
    /// Height at the extreme in meters above the station datum.
    pub height_m: f64,
    /// High or low water.
    pub kind: ExtremeKind,
}

/// One harmonic constant of a station: the (amplitude, phase lag) pair
/// describing a single constituent's local behavior.
///
/// The phase lag is the Greenwich epoch phase in degrees. It is conventionally
/// stored in [0, 360) but callers are not required to pre-normalize it; the
/// synthesis normalizes the final phase anyway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonicConstant {
    /// Constituent symbol, e.g. "M2". Matched against the catalog by exact
    /// (uppercase) comparison.
    pub symbol: String,
    /// Amplitude in meters. Non-negative.
    pub amplitude_m: f64,
    /// Greenwich epoch phase lag in degrees.
    pub phase_lag_deg: f64,
}

/// A tide station: identity, location, and the harmonic constants that drive
/// prediction.
///
/// Stations are read-only reference data; the engine never mutates them. A
/// symbol appears at most once per station by convention (not enforced), and
/// a station may carry constituents the catalog does not implement; those
/// are skipped during synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier (e.g. a NOAA station ID).
    pub id: String,
    /// Human-readable station name.
    pub name: String,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// IANA timezone name for display purposes; predictions are UTC.
    pub timezone: String,
    /// Named vertical datum the heights are referenced to (e.g. "MLLW").
    /// Stored as-is, not validated.
    pub datum: String,
    /// Harmonic constants, unordered.
    pub constituents: Vec<HarmonicConstant>,
}
