//! Astronomical parameters for harmonic tide prediction.
//!
//! Converts a timestamp into the six angles every constituent's equilibrium
//! argument is built from: the hour angle T, the mean longitudes of the Moon
//! (s) and Sun (h), the lunar perigee (p), the lunar ascending node (N,
//! retrograde), and the solar perigee (pp). All angles are degrees in
//! [0, 360), computed fresh for every timestamp.
//!
//! The mean-longitude polynomials use Julian centuries since J2000.0 with
//! fixed published coefficients (Meeus, *Astronomical Algorithms*, 2nd ed.,
//! ch. 25 and 47). Century-scale polynomial terms amplify rounding error, so
//! everything here stays in f64.

use chrono::{DateTime, Timelike, Utc};

/// Julian Date of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Milliseconds per day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Julian Date of the J2000.0 epoch, 2000-01-01T12:00:00 TT.
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// The six astronomical angles, in degrees, at one instant.
///
/// Field order matches the Doodson multiplier order used by the constituent
/// catalog: (T, s, h, p, N, pp).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AstronomicalParameters {
    /// T: hour angle of the mean sun, fractional hours since UTC midnight
    /// times 15 degrees.
    pub hour_angle: f64,
    /// s: mean longitude of the Moon.
    pub lunar_longitude: f64,
    /// h: mean longitude of the Sun.
    pub solar_longitude: f64,
    /// p: mean longitude of the lunar perigee.
    pub lunar_perigee: f64,
    /// N: mean longitude of the lunar ascending node (retrograde, 18.61-year
    /// cycle). Drives every nodal correction.
    pub lunar_node: f64,
    /// pp: mean longitude of the solar perigee (perihelion).
    pub solar_perigee: f64,
}

impl AstronomicalParameters {
    /// The angles as an array in Doodson multiplier order (T, s, h, p, N, pp).
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.hour_angle,
            self.lunar_longitude,
            self.solar_longitude,
            self.lunar_perigee,
            self.lunar_node,
            self.solar_perigee,
        ]
    }
}

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Julian Date of a timestamp.
///
/// Exact to the millisecond: `JD = unix_ms / 86_400_000 + 2_440_587.5`.
pub fn julian_date(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

/// Timestamp of a Julian Date, rounded to the nearest millisecond.
///
/// Returns `None` only when the Julian Date falls outside chrono's
/// representable range (roughly +/-262,000 years). Inverse of
/// [`julian_date`] within 1 ms over the whole practical domain.
pub fn datetime_from_julian(jd: f64) -> Option<DateTime<Utc>> {
    let unix_ms = (jd - UNIX_EPOCH_JD) * MS_PER_DAY;
    if !unix_ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(unix_ms.round() as i64)
}

/// Julian centuries elapsed since J2000.0 at a timestamp.
pub fn julian_centuries(t: DateTime<Utc>) -> f64 {
    (julian_date(t) - J2000_JD) / DAYS_PER_CENTURY
}

/// Compute the six astronomical angles at a timestamp.
///
/// Total over any finite timestamp; all outputs are normalized to [0, 360).
///
/// Sources for the polynomial coefficients:
/// - s, p: Meeus ch. 47 (mean longitude of the Moon and of its perigee)
/// - h, pp: Meeus ch. 25 (geometric mean longitude of the Sun, longitude of
///   perihelion)
/// - N: Meeus ch. 47 (mean longitude of the ascending node)
pub fn parameters(t: DateTime<Utc>) -> AstronomicalParameters {
    // Hour angle: fractional hours since UTC midnight, 15 degrees per hour.
    let ms_of_day = i64::from(t.num_seconds_from_midnight()) * 1000
        + i64::from(t.timestamp_subsec_millis());
    let hour_angle = ms_of_day as f64 / 3_600_000.0 * 15.0;

    let tc = julian_centuries(t);
    let tc2 = tc * tc;
    let tc3 = tc2 * tc;
    let tc4 = tc3 * tc;

    let lunar_longitude = normalize_degrees(
        218.316_447_7 + 481_267.881_234_21 * tc - 0.001_578_6 * tc2 + tc3 / 538_841.0,
    );
    let solar_longitude = normalize_degrees(
        280.466_456_7 + 36_000.769_827_79 * tc + 0.000_303_202_8 * tc2 + tc3 / 49_931.0
            - tc4 / 15_300.0,
    );
    let lunar_perigee = normalize_degrees(
        83.353_246_5 + 4_069.013_728_7 * tc - 0.010_320_0 * tc2 - tc3 / 80_053.0,
    );
    // Retrograde: the node regresses through one revolution every 18.61 years.
    let lunar_node = normalize_degrees(
        125.044_52 - 1_934.136_261 * tc + 0.002_070_8 * tc2 + tc3 / 450_000.0,
    );
    let solar_perigee = normalize_degrees(282.937_35 + 1.719_46 * tc + 0.000_46 * tc2);

    AstronomicalParameters {
        hour_angle,
        lunar_longitude,
        solar_longitude,
        lunar_perigee,
        lunar_node,
        solar_perigee,
    }
}

/// Lunar phase as a fraction of the synodic cycle, in [0, 1).
///
/// A linear re-expression of lunar elongation: `normalize(s - h) / 360`.
/// 0 = new moon, 0.5 = full moon. Uses mean longitudes, so it can lead or
/// trail the true phase by a fraction of a day.
pub fn lunar_phase(t: DateTime<Utc>) -> f64 {
    let params = parameters(t);
    normalize_degrees(params.lunar_longitude - params.solar_longitude) / 360.0
}
