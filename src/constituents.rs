//! Constituent catalog for harmonic tide prediction.
//!
//! Defines the canonical set of named tidal constituents this engine
//! implements, along with their Doodson multipliers, angular speeds and
//! family classification. This is the single source of truth for constituent
//! data; synthesis and analytics reference entries from here rather than
//! hardcoding symbols.
//!
//! Doodson multipliers are expressed over the six astronomical angles
//! (T, s, h, p, N, pp) in the order produced by
//! [`crate::astro::AstronomicalParameters::as_array`]. A constituent's
//! angular speed equals the multiplier-weighted sum of the six fundamental
//! rates, and its period is derived from the speed (`360 / speed`), so the
//! two can never drift apart.
//!
//! Symbols and speeds follow the NOAA standard 37-constituent list.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::astro::{normalize_degrees, AstronomicalParameters};

/// Broad classification of a constituent by its period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Roughly twice-daily (period near 12 h).
    Semidiurnal,
    /// Roughly once-daily (period near 24 h).
    Diurnal,
    /// Fortnightly to annual.
    LongPeriod,
    /// Overtides and compound tides generated by nonlinear interaction in
    /// shallow water.
    ShallowWater,
}

/// Rates of change of the six astronomical angles, degrees per mean solar
/// hour, in (T, s, h, p, N, pp) order.
pub const FUNDAMENTAL_RATES_DEG_PER_HOUR: [f64; 6] = [
    15.0,          // T: hour angle
    0.549_016_53,  // s: lunar mean longitude
    0.041_068_64,  // h: solar mean longitude
    0.004_641_83,  // p: lunar perigee
    -0.002_206_41, // N: lunar node (retrograde)
    0.000_001_96,  // pp: solar perigee
];

/// Static reference data for one tidal constituent.
#[derive(Clone, Debug)]
pub struct Constituent {
    /// Unique short code, the catalog's primary key. Uppercase.
    pub symbol: &'static str,
    /// Conventional display name.
    pub name: &'static str,
    /// Signed multipliers over (T, s, h, p, N, pp).
    pub doodson: [i8; 6],
    /// Angular speed in degrees per mean solar hour.
    pub speed_deg_per_hour: f64,
    /// Period classification.
    pub family: Family,
    /// One-line description of the constituent's origin.
    pub description: &'static str,
}

impl Constituent {
    /// Period in hours, derived from the angular speed.
    pub fn period_hours(&self) -> f64 {
        360.0 / self.speed_deg_per_hour
    }

    /// Equilibrium argument V0 in degrees at the given astronomical
    /// parameters: the Doodson-weighted sum of the six angles, normalized
    /// to [0, 360).
    pub fn equilibrium_argument_deg(&self, params: &AstronomicalParameters) -> f64 {
        let angles = params.as_array();
        let mut v0 = 0.0;
        for (multiplier, angle) in self.doodson.iter().zip(angles.iter()) {
            v0 += f64::from(*multiplier) * angle;
        }
        normalize_degrees(v0)
    }
}

/// All constituents this engine implements, grouped by family.
///
/// Speeds are the NOAA published values; the registry test checks each one
/// against the Doodson-weighted sum of [`FUNDAMENTAL_RATES_DEG_PER_HOUR`].
pub static CONSTITUENT_REGISTRY: &[Constituent] = &[
    // -- Semidiurnal ------------------------------------------------------
    Constituent {
        symbol: "M2",
        name: "Principal lunar semidiurnal",
        doodson: [2, -2, 2, 0, 0, 0],
        speed_deg_per_hour: 28.984_104_2,
        family: Family::Semidiurnal,
        description: "Main tide raised by the Moon; dominates most coastal records.",
    },
    Constituent {
        symbol: "S2",
        name: "Principal solar semidiurnal",
        doodson: [2, 0, 0, 0, 0, 0],
        speed_deg_per_hour: 30.0,
        family: Family::Semidiurnal,
        description: "Main tide raised by the Sun; beats against M2 in the spring/neap cycle.",
    },
    Constituent {
        symbol: "N2",
        name: "Larger lunar elliptic semidiurnal",
        doodson: [2, -3, 2, 1, 0, 0],
        speed_deg_per_hour: 28.439_729_5,
        family: Family::Semidiurnal,
        description: "Monthly modulation of M2 from the Moon's orbital eccentricity.",
    },
    Constituent {
        symbol: "L2",
        name: "Smaller lunar elliptic semidiurnal",
        doodson: [2, -1, 2, -1, 0, 0],
        speed_deg_per_hour: 29.528_478_9,
        family: Family::Semidiurnal,
        description: "Elliptic partner of N2 on the other side of M2.",
    },
    Constituent {
        symbol: "K2",
        name: "Lunisolar declinational semidiurnal",
        doodson: [2, 0, 2, 0, 0, 0],
        speed_deg_per_hour: 30.082_137_3,
        family: Family::Semidiurnal,
        description: "Declination effect of Moon and Sun combined.",
    },
    Constituent {
        symbol: "T2",
        name: "Larger solar elliptic semidiurnal",
        doodson: [2, 0, -1, 0, 0, 1],
        speed_deg_per_hour: 29.958_933_3,
        family: Family::Semidiurnal,
        description: "Annual modulation of S2 from the Earth's orbital eccentricity.",
    },
    Constituent {
        symbol: "R2",
        name: "Smaller solar elliptic semidiurnal",
        doodson: [2, 0, 1, 0, 0, -1],
        speed_deg_per_hour: 30.041_066_7,
        family: Family::Semidiurnal,
        description: "Elliptic partner of T2 on the other side of S2.",
    },
    Constituent {
        symbol: "2N2",
        name: "Lunar elliptic semidiurnal, second order",
        doodson: [2, -4, 2, 2, 0, 0],
        speed_deg_per_hour: 27.895_354_8,
        family: Family::Semidiurnal,
        description: "Second-order eccentricity modulation of M2.",
    },
    Constituent {
        symbol: "MU2",
        name: "Variational semidiurnal",
        doodson: [2, -4, 4, 0, 0, 0],
        speed_deg_per_hour: 27.968_208_4,
        family: Family::Semidiurnal,
        description: "Variation term from the changing Sun-Moon distance.",
    },
    Constituent {
        symbol: "NU2",
        name: "Larger lunar evectional semidiurnal",
        doodson: [2, -3, 4, -1, 0, 0],
        speed_deg_per_hour: 28.512_583_1,
        family: Family::Semidiurnal,
        description: "Evection term: solar perturbation of the lunar orbit.",
    },
    Constituent {
        symbol: "LAM2",
        name: "Smaller lunar evectional semidiurnal",
        doodson: [2, -1, 0, 1, 0, 0],
        speed_deg_per_hour: 29.455_625_3,
        family: Family::Semidiurnal,
        description: "Minor evection term paired with NU2.",
    },
    // -- Diurnal ----------------------------------------------------------
    Constituent {
        symbol: "K1",
        name: "Lunisolar declinational diurnal",
        doodson: [1, 0, 1, 0, 0, 0],
        speed_deg_per_hour: 15.041_068_6,
        family: Family::Diurnal,
        description: "Strongest diurnal constituent; Moon and Sun declination combined.",
    },
    Constituent {
        symbol: "O1",
        name: "Principal lunar diurnal",
        doodson: [1, -2, 1, 0, 0, 0],
        speed_deg_per_hour: 13.943_035_6,
        family: Family::Diurnal,
        description: "Main diurnal tide raised by the Moon's declination.",
    },
    Constituent {
        symbol: "P1",
        name: "Principal solar diurnal",
        doodson: [1, 0, -1, 0, 0, 0],
        speed_deg_per_hour: 14.958_931_4,
        family: Family::Diurnal,
        description: "Main diurnal tide raised by the Sun's declination.",
    },
    Constituent {
        symbol: "Q1",
        name: "Larger lunar elliptic diurnal",
        doodson: [1, -3, 1, 1, 0, 0],
        speed_deg_per_hour: 13.398_660_9,
        family: Family::Diurnal,
        description: "Monthly modulation of O1 from orbital eccentricity.",
    },
    Constituent {
        symbol: "2Q1",
        name: "Larger elliptic diurnal, second order",
        doodson: [1, -4, 1, 2, 0, 0],
        speed_deg_per_hour: 12.854_286_2,
        family: Family::Diurnal,
        description: "Second-order eccentricity modulation of O1.",
    },
    Constituent {
        symbol: "RHO1",
        name: "Larger lunar evectional diurnal",
        doodson: [1, -3, 3, -1, 0, 0],
        speed_deg_per_hour: 13.471_514_5,
        family: Family::Diurnal,
        description: "Evection term in the diurnal band.",
    },
    Constituent {
        symbol: "M1",
        name: "Smaller lunar elliptic diurnal",
        doodson: [1, -1, 1, 1, 0, 0],
        speed_deg_per_hour: 14.496_693_9,
        family: Family::Diurnal,
        description: "Elliptic partner of Q1 on the other side of O1.",
    },
    Constituent {
        symbol: "J1",
        name: "Smaller lunar elliptic diurnal, upper",
        doodson: [1, 1, 1, -1, 0, 0],
        speed_deg_per_hour: 15.585_443_3,
        family: Family::Diurnal,
        description: "Elliptic modulation above K1.",
    },
    Constituent {
        symbol: "OO1",
        name: "Lunar diurnal, second order",
        doodson: [1, 2, 1, 0, 0, 0],
        speed_deg_per_hour: 16.139_101_7,
        family: Family::Diurnal,
        description: "Second-order declinational diurnal tide.",
    },
    Constituent {
        symbol: "S1",
        name: "Solar diurnal",
        doodson: [1, 0, 0, 0, 0, 0],
        speed_deg_per_hour: 15.0,
        family: Family::Diurnal,
        description: "Largely radiational (weather-driven) rather than gravitational.",
    },
    // -- Long period ------------------------------------------------------
    Constituent {
        symbol: "MM",
        name: "Lunar monthly",
        doodson: [0, 1, 0, -1, 0, 0],
        speed_deg_per_hour: 0.544_374_7,
        family: Family::LongPeriod,
        description: "Monthly cycle of the Moon's distance (perigee to perigee).",
    },
    Constituent {
        symbol: "MF",
        name: "Lunisolar fortnightly",
        doodson: [0, 2, 0, 0, 0, 0],
        speed_deg_per_hour: 1.098_033_1,
        family: Family::LongPeriod,
        description: "Fortnightly cycle of the Moon's declination.",
    },
    Constituent {
        symbol: "MSF",
        name: "Lunisolar synodic fortnightly",
        doodson: [0, 2, -2, 0, 0, 0],
        speed_deg_per_hour: 1.015_895_8,
        family: Family::LongPeriod,
        description: "Fortnightly beat between M2 and S2.",
    },
    Constituent {
        symbol: "SA",
        name: "Solar annual",
        doodson: [0, 0, 1, 0, 0, 0],
        speed_deg_per_hour: 0.041_068_6,
        family: Family::LongPeriod,
        description: "Annual cycle, mostly seasonal (steric and meteorological).",
    },
    Constituent {
        symbol: "SSA",
        name: "Solar semiannual",
        doodson: [0, 0, 2, 0, 0, 0],
        speed_deg_per_hour: 0.082_137_3,
        family: Family::LongPeriod,
        description: "Semiannual cycle of the Sun's declination.",
    },
    // -- Shallow water ----------------------------------------------------
    Constituent {
        symbol: "M4",
        name: "First overtide of M2",
        doodson: [4, -4, 4, 0, 0, 0],
        speed_deg_per_hour: 57.968_208_4,
        family: Family::ShallowWater,
        description: "Quarter-diurnal harmonic of M2 generated in shallow water.",
    },
    Constituent {
        symbol: "M6",
        name: "Second overtide of M2",
        doodson: [6, -6, 6, 0, 0, 0],
        speed_deg_per_hour: 86.952_312_7,
        family: Family::ShallowWater,
        description: "Sixth-diurnal harmonic of M2.",
    },
    Constituent {
        symbol: "M8",
        name: "Third overtide of M2",
        doodson: [8, -8, 8, 0, 0, 0],
        speed_deg_per_hour: 115.936_416_6,
        family: Family::ShallowWater,
        description: "Eighth-diurnal harmonic of M2.",
    },
    Constituent {
        symbol: "S4",
        name: "First overtide of S2",
        doodson: [4, 0, 0, 0, 0, 0],
        speed_deg_per_hour: 60.0,
        family: Family::ShallowWater,
        description: "Quarter-diurnal harmonic of S2.",
    },
    Constituent {
        symbol: "S6",
        name: "Second overtide of S2",
        doodson: [6, 0, 0, 0, 0, 0],
        speed_deg_per_hour: 90.0,
        family: Family::ShallowWater,
        description: "Sixth-diurnal harmonic of S2.",
    },
    Constituent {
        symbol: "MN4",
        name: "Lunar elliptic quarter-diurnal",
        doodson: [4, -5, 4, 1, 0, 0],
        speed_deg_per_hour: 57.423_833_7,
        family: Family::ShallowWater,
        description: "Compound of M2 and N2.",
    },
    Constituent {
        symbol: "MS4",
        name: "Lunisolar quarter-diurnal",
        doodson: [4, -2, 2, 0, 0, 0],
        speed_deg_per_hour: 58.984_104_2,
        family: Family::ShallowWater,
        description: "Compound of M2 and S2.",
    },
    Constituent {
        symbol: "MK3",
        name: "Lunisolar terdiurnal",
        doodson: [3, -2, 3, 0, 0, 0],
        speed_deg_per_hour: 44.025_172_9,
        family: Family::ShallowWater,
        description: "Compound of M2 and K1.",
    },
    Constituent {
        symbol: "2MK3",
        name: "Lunar terdiurnal",
        doodson: [3, -4, 3, 0, 0, 0],
        speed_deg_per_hour: 42.927_139_8,
        family: Family::ShallowWater,
        description: "Compound of twice M2 less K1.",
    },
    Constituent {
        symbol: "M3",
        name: "Lunar terdiurnal, direct",
        doodson: [3, -3, 3, 0, 0, 0],
        speed_deg_per_hour: 43.476_156_3,
        family: Family::ShallowWater,
        description: "Third-diurnal tide raised directly by the Moon.",
    },
    Constituent {
        symbol: "2SM2",
        name: "Shallow water semidiurnal",
        doodson: [2, 2, -2, 0, 0, 0],
        speed_deg_per_hour: 31.015_895_8,
        family: Family::ShallowWater,
        description: "Compound of twice S2 less M2.",
    },
];

/// The constituent catalog: the registry keyed by symbol for O(1) lookup.
///
/// Built once and borrowed by every engine call; immutable for the life of
/// the process, which keeps all engine operations pure and thread-safe.
pub struct ConstituentCatalog {
    by_symbol: HashMap<&'static str, &'static Constituent>,
}

impl ConstituentCatalog {
    /// The standard catalog over [`CONSTITUENT_REGISTRY`], built on first
    /// use.
    pub fn standard() -> &'static ConstituentCatalog {
        static CATALOG: OnceLock<ConstituentCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            let by_symbol = CONSTITUENT_REGISTRY
                .iter()
                .map(|c| (c.symbol, c))
                .collect();
            ConstituentCatalog { by_symbol }
        })
    }

    /// Look up a constituent by its (uppercase) symbol.
    pub fn get(&self, symbol: &str) -> Option<&'static Constituent> {
        self.by_symbol.get(symbol).copied()
    }

    /// Whether the catalog implements the given symbol.
    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Number of constituents in the catalog.
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    /// True when the catalog holds no constituents.
    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Iterate over the catalog's constituents in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Constituent> {
        CONSTITUENT_REGISTRY.iter()
    }
}
