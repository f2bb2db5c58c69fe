//! Analytics derived from the harmonic engine: high/low water detection,
//! tidal range, and the astronomical spring/neap and lunar-phase
//! indicators.
//!
//! Like the synthesis layer, everything here is stateless and pure; the
//! extrema scan operates on an already-materialized series and the range
//! and indicator functions synthesize what they need on the fly.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::astro::{self, normalize_degrees, AstronomicalParameters};
use crate::constituents::ConstituentCatalog;
use crate::synthesis::predict_tide;
use crate::{ExtremeKind, Station, TideExtreme, TidePrediction};

pub use crate::astro::lunar_phase;

/// Half-width of the tidal-range window in minutes (12.5 h, longer than one
/// full semidiurnal cycle).
pub const RANGE_WINDOW_MINUTES: i64 = 750;

/// Sampling resolution of the tidal-range window in minutes.
pub const RANGE_INTERVAL_MINUTES: i64 = 10;

/// Height envelope of a station around an instant.
///
/// A numeric min/max over a sampled window, not typed extrema; use
/// [`find_extremes`] for high/low water events.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TidalRange {
    /// Lowest sampled height in meters.
    pub min_height_m: f64,
    /// Highest sampled height in meters.
    pub max_height_m: f64,
}

/// Detect local extremes in a time-ascending prediction series.
///
/// Every interior point is compared against its immediate neighbors with
/// strict inequality: strictly greater than both is a high, strictly less
/// than both is a low. Equal-height plateaus and monotonic runs produce no
/// extremum; a flat-bottomed trough therefore yields zero detected lows.
/// That is the intended policy: a local extreme must be strict on both
/// sides, and the caller's sampling interval decides how flat is flat.
///
/// Series shorter than 3 points have no interior and return an empty list.
pub fn find_extremes(series: &[TidePrediction]) -> Vec<TideExtreme> {
    if series.len() < 3 {
        return Vec::new();
    }

    let mut extremes = Vec::new();
    for window in series.windows(3) {
        let (left, mid, right) = (&window[0], &window[1], &window[2]);
        let kind = if mid.height_m > left.height_m && mid.height_m > right.height_m {
            Some(ExtremeKind::High)
        } else if mid.height_m < left.height_m && mid.height_m < right.height_m {
            Some(ExtremeKind::Low)
        } else {
            None
        };
        if let Some(kind) = kind {
            extremes.push(TideExtreme {
                timestamp: mid.timestamp,
                height_m: mid.height_m,
                kind,
            });
        }
    }
    extremes
}

/// Min/max height envelope over a window of +/-12.5 hours around `t` at
/// 10-minute resolution.
///
/// The window exceeds one full semidiurnal cycle, so both a high and a low
/// water always fall inside it; any single prediction at `t` is contained
/// in the returned envelope.
pub fn tidal_range(
    catalog: &ConstituentCatalog,
    station: &Station,
    t: DateTime<Utc>,
) -> TidalRange {
    let mut min_height_m = f64::INFINITY;
    let mut max_height_m = f64::NEG_INFINITY;

    let mut offset = -RANGE_WINDOW_MINUTES;
    while offset <= RANGE_WINDOW_MINUTES {
        let height = predict_tide(catalog, station, t + Duration::minutes(offset));
        min_height_m = min_height_m.min(height);
        max_height_m = max_height_m.max(height);
        offset += RANGE_INTERVAL_MINUTES;
    }

    TidalRange {
        min_height_m,
        max_height_m,
    }
}

/// Spring/neap alignment indicator in [-1, 1] at an instant.
///
/// Computes the equilibrium arguments of M2 and S2 from the standard
/// catalog (no station involved) and returns `cos(2 * (V0_M2 - V0_S2))`:
/// +1 when the lunar and solar semidiurnal tides reinforce (spring, at 0 or
/// 180 degrees of separation), -1 when they cancel (neap, at 90 or 270).
/// Station-independent because it reflects Sun-Moon geometry, not local
/// amplification.
pub fn spring_neap_indicator(t: DateTime<Utc>) -> f64 {
    spring_neap_from_parameters(&astro::parameters(t))
}

fn spring_neap_from_parameters(params: &AstronomicalParameters) -> f64 {
    let catalog = ConstituentCatalog::standard();
    let (m2, s2) = match (catalog.get("M2"), catalog.get("S2")) {
        (Some(m2), Some(s2)) => (m2, s2),
        // The standard catalog always carries both; a custom build without
        // them has no spring/neap geometry to report.
        _ => return 0.0,
    };
    let phase_diff = normalize_degrees(
        m2.equilibrium_argument_deg(params) - s2.equilibrium_argument_deg(params),
    );
    (2.0 * phase_diff).to_radians().cos()
}
