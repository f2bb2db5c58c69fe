//! Nodal corrections for the 18.6-year lunar nodal cycle.
//!
//! The Moon's ascending node regresses through a full revolution every 18.61
//! years, slowly modulating the amplitude and phase of every lunar
//! constituent. This module maps a constituent symbol and the current node
//! angle N to an amplitude factor f and a phase offset u (degrees).
//!
//! Dispatch is by family membership through a static symbol-to-formula
//! table, not a generic formula: lunar groups share one correction, solar
//! constituents get none (the node is a lunar-orbit property), and
//! shallow-water compounds derive theirs as powers and products of the base
//! M2/K1 factors because they are harmonics of those tides.
//!
//! The formulas are single-term truncations of Schureman's Table 14. That
//! is a deliberate, bounded approximation: predictions will diverge from
//! official tide tables by a small but non-zero margin, and symbols with no
//! usable single-term form (M1, MSF) plus anything else outside the table
//! fall back to the neutral correction (f = 1, u = 0) rather than failing.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Amplitude factor f and phase offset u for one constituent at one node
/// angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodalCorrection {
    /// Multiplies the stored amplitude. Close to 1.
    pub amplitude_factor: f64,
    /// Added to the equilibrium argument, in degrees.
    pub phase_offset_deg: f64,
}

impl NodalCorrection {
    /// The no-op correction applied to solar constituents and to any symbol
    /// outside the formula table.
    pub const NEUTRAL: NodalCorrection = NodalCorrection {
        amplitude_factor: 1.0,
        phase_offset_deg: 0.0,
    };
}

/// Which correction formula a symbol uses.
#[derive(Clone, Copy, Debug)]
enum Formula {
    /// M2 and its elliptic/evectional satellites.
    LunarSemidiurnal,
    /// O1 and its elliptic/evectional satellites.
    LunarDiurnal,
    K1,
    K2,
    J1,
    Oo1,
    Mf,
    Mm,
    /// Sun-referenced: no nodal modulation.
    Solar,
    /// Compound tide: f multiplies the base factors by absolute exponent,
    /// u combines the base offsets by signed exponent.
    Compound { m2: f64, k1: f64 },
}

/// Symbol-to-formula table. Anything absent falls back to
/// [`NodalCorrection::NEUTRAL`].
static FORMULA_TABLE: &[(&str, Formula)] = &[
    ("M2", Formula::LunarSemidiurnal),
    ("N2", Formula::LunarSemidiurnal),
    ("2N2", Formula::LunarSemidiurnal),
    ("MU2", Formula::LunarSemidiurnal),
    ("NU2", Formula::LunarSemidiurnal),
    ("L2", Formula::LunarSemidiurnal),
    ("LAM2", Formula::LunarSemidiurnal),
    ("O1", Formula::LunarDiurnal),
    ("Q1", Formula::LunarDiurnal),
    ("2Q1", Formula::LunarDiurnal),
    ("RHO1", Formula::LunarDiurnal),
    ("K1", Formula::K1),
    ("K2", Formula::K2),
    ("J1", Formula::J1),
    ("OO1", Formula::Oo1),
    ("MF", Formula::Mf),
    ("MM", Formula::Mm),
    ("S2", Formula::Solar),
    ("T2", Formula::Solar),
    ("R2", Formula::Solar),
    ("P1", Formula::Solar),
    ("S1", Formula::Solar),
    ("SA", Formula::Solar),
    ("SSA", Formula::Solar),
    ("S4", Formula::Solar),
    ("S6", Formula::Solar),
    ("M4", Formula::Compound { m2: 2.0, k1: 0.0 }),
    ("MN4", Formula::Compound { m2: 2.0, k1: 0.0 }),
    ("MS4", Formula::Compound { m2: 1.0, k1: 0.0 }),
    ("M6", Formula::Compound { m2: 3.0, k1: 0.0 }),
    ("M8", Formula::Compound { m2: 4.0, k1: 0.0 }),
    ("M3", Formula::Compound { m2: 1.5, k1: 0.0 }),
    ("MK3", Formula::Compound { m2: 1.0, k1: 1.0 }),
    ("2MK3", Formula::Compound { m2: 2.0, k1: -1.0 }),
    ("2SM2", Formula::Compound { m2: -1.0, k1: 0.0 }),
];

fn formula_for(symbol: &str) -> Option<Formula> {
    static INDEX: OnceLock<HashMap<&'static str, Formula>> = OnceLock::new();
    let index = INDEX.get_or_init(|| FORMULA_TABLE.iter().copied().collect());
    index.get(symbol).copied()
}

/// Nodal correction for a constituent symbol at lunar node angle `node_deg`.
///
/// Pure and total over any real node angle. Symbols not covered by the
/// formula table get the neutral correction; treating unmodeled
/// constituents as unaffected by the nodal cycle is an approximation
/// policy, not a missing-data error.
pub fn nodal_correction(symbol: &str, node_deg: f64) -> NodalCorrection {
    match formula_for(symbol) {
        Some(formula) => evaluate(formula, node_deg),
        None => NodalCorrection::NEUTRAL,
    }
}

fn evaluate(formula: Formula, node_deg: f64) -> NodalCorrection {
    let n = node_deg.to_radians();
    match formula {
        Formula::LunarSemidiurnal => NodalCorrection {
            amplitude_factor: 1.0 - 0.037 * n.cos(),
            phase_offset_deg: -2.1 * n.sin(),
        },
        Formula::LunarDiurnal => NodalCorrection {
            amplitude_factor: 1.0 + 0.189 * n.cos(),
            phase_offset_deg: 10.8 * n.sin(),
        },
        Formula::K1 => NodalCorrection {
            amplitude_factor: 1.0 + 0.115 * n.cos(),
            phase_offset_deg: -8.9 * n.sin(),
        },
        Formula::K2 => NodalCorrection {
            amplitude_factor: 1.0 + 0.286 * n.cos(),
            phase_offset_deg: -17.7 * n.sin(),
        },
        Formula::J1 => NodalCorrection {
            amplitude_factor: 1.0 + 0.169 * n.cos(),
            phase_offset_deg: -12.9 * n.sin(),
        },
        Formula::Oo1 => NodalCorrection {
            amplitude_factor: 1.0 + 0.640 * n.cos(),
            phase_offset_deg: -23.7 * n.sin(),
        },
        Formula::Mf => NodalCorrection {
            amplitude_factor: 1.0 + 0.415 * n.cos(),
            phase_offset_deg: -23.7 * n.sin(),
        },
        Formula::Mm => NodalCorrection {
            amplitude_factor: 1.0 - 0.130 * n.cos(),
            phase_offset_deg: 0.0,
        },
        Formula::Solar => NodalCorrection::NEUTRAL,
        Formula::Compound { m2, k1 } => {
            let m2_base = evaluate(Formula::LunarSemidiurnal, node_deg);
            let k1_base = evaluate(Formula::K1, node_deg);
            NodalCorrection {
                amplitude_factor: m2_base.amplitude_factor.powf(m2.abs())
                    * k1_base.amplitude_factor.powf(k1.abs()),
                phase_offset_deg: m2 * m2_base.phase_offset_deg
                    + k1 * k1_base.phase_offset_deg,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn m2_family_at_zero_node() {
        // f = 1 - 0.037*cos(0) = 0.963, u = -2.1*sin(0) = 0
        for symbol in ["M2", "N2", "2N2", "MU2", "NU2", "L2", "LAM2"] {
            let c = nodal_correction(symbol, 0.0);
            assert!(
                (c.amplitude_factor - 0.963).abs() < EPS,
                "{symbol}: f = {}, expected 0.963",
                c.amplitude_factor
            );
            assert!(c.phase_offset_deg.abs() < EPS);
        }
    }

    #[test]
    fn m2_family_at_quarter_node() {
        let c = nodal_correction("M2", 90.0);
        assert!((c.amplitude_factor - 1.0).abs() < EPS);
        assert!((c.phase_offset_deg - (-2.1)).abs() < EPS);
    }

    #[test]
    fn solar_constituents_are_unmodulated() {
        for symbol in ["S2", "T2", "R2", "P1", "S1", "SA", "SSA", "S4", "S6"] {
            for node in [0.0, 45.0, 137.2, 270.0] {
                let c = nodal_correction(symbol, node);
                assert_eq!(
                    c,
                    NodalCorrection::NEUTRAL,
                    "{symbol} should be node-independent"
                );
            }
        }
    }

    #[test]
    fn compounds_are_powers_of_the_base_factor() {
        let node = 63.0;
        let m2 = nodal_correction("M2", node);
        let k1 = nodal_correction("K1", node);

        let m4 = nodal_correction("M4", node);
        assert!((m4.amplitude_factor - m2.amplitude_factor.powi(2)).abs() < EPS);
        assert!((m4.phase_offset_deg - 2.0 * m2.phase_offset_deg).abs() < EPS);

        let m6 = nodal_correction("M6", node);
        assert!((m6.amplitude_factor - m2.amplitude_factor.powi(3)).abs() < EPS);
        assert!((m6.phase_offset_deg - 3.0 * m2.phase_offset_deg).abs() < EPS);

        let m8 = nodal_correction("M8", node);
        assert!((m8.amplitude_factor - m2.amplitude_factor.powi(4)).abs() < EPS);

        let mk3 = nodal_correction("MK3", node);
        assert!(
            (mk3.amplitude_factor - m2.amplitude_factor * k1.amplitude_factor).abs() < EPS
        );
        assert!(
            (mk3.phase_offset_deg - (m2.phase_offset_deg + k1.phase_offset_deg)).abs() < EPS
        );

        // 2MK3 = 2*M2 - K1: amplitude still multiplies, phase subtracts.
        let two_mk3 = nodal_correction("2MK3", node);
        assert!(
            (two_mk3.amplitude_factor - m2.amplitude_factor.powi(2) * k1.amplitude_factor)
                .abs()
                < EPS
        );
        assert!(
            (two_mk3.phase_offset_deg - (2.0 * m2.phase_offset_deg - k1.phase_offset_deg))
                .abs()
                < EPS
        );

        // 2SM2 = 2*S2 - M2: S2 contributes nothing, M2 enters inverted.
        let two_sm2 = nodal_correction("2SM2", node);
        assert!((two_sm2.amplitude_factor - m2.amplitude_factor).abs() < EPS);
        assert!((two_sm2.phase_offset_deg - (-m2.phase_offset_deg)).abs() < EPS);
    }

    #[test]
    fn k1_and_k2_move_in_opposite_amplitude_sense_to_m2() {
        let c_m2 = nodal_correction("M2", 0.0);
        let c_k1 = nodal_correction("K1", 0.0);
        let c_k2 = nodal_correction("K2", 0.0);
        assert!(c_m2.amplitude_factor < 1.0);
        assert!(c_k1.amplitude_factor > 1.0);
        assert!(c_k2.amplitude_factor > 1.0);
    }

    #[test]
    fn unlisted_symbols_fall_back_to_neutral() {
        for symbol in ["M1", "MSF", "2MS6", "NOT_A_TIDE", ""] {
            let c = nodal_correction(symbol, 123.4);
            assert_eq!(c, NodalCorrection::NEUTRAL, "{symbol} should be neutral");
        }
    }

    #[test]
    fn total_over_unnormalized_node_angles() {
        // Callers may pass any real N; only its trig values matter.
        let a = nodal_correction("M2", -270.0);
        let b = nodal_correction("M2", 90.0);
        assert!((a.amplitude_factor - b.amplitude_factor).abs() < EPS);
        assert!((a.phase_offset_deg - b.phase_offset_deg).abs() < EPS);
    }
}
