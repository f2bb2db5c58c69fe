//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! tide-config.toml file. It provides a centralized way to configure the
//! station record (identity, location, harmonic constants) and the
//! prediction window the binary renders.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{HarmonicConstant, Station};

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Station identity, location and harmonic constants
    pub station: StationConfig,
    /// Prediction window and resolution
    pub prediction: PredictionConfig,
}

/// Tide station configuration, including its harmonic constants
#[derive(Debug, Deserialize, Serialize)]
pub struct StationConfig {
    /// Station ID (e.g., "8418150" for Portland, ME)
    pub id: String,
    /// Human-readable station name
    pub name: String,
    /// WGS84 latitude
    pub latitude: f64,
    /// WGS84 longitude
    pub longitude: f64,
    /// IANA timezone name, for display only
    pub timezone: String,
    /// Vertical datum the amplitudes are referenced to
    pub datum: String,
    /// Harmonic constants: one `[[station.constituents]]` table per
    /// constituent
    pub constituents: Vec<HarmonicConstant>,
}

/// Prediction window configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct PredictionConfig {
    /// Half-width of the rendered window in hours (shows -window to +window
    /// from current time)
    pub window_hours: i64,
    /// Series resolution in minutes
    pub interval_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                id: "8418150".to_string(),
                name: "Portland, ME".to_string(),
                latitude: 43.6567,
                longitude: -70.2467,
                timezone: "America/New_York".to_string(),
                datum: "MLLW".to_string(),
                // NOAA harmonic constants for Portland, ME, amplitudes in
                // meters, Greenwich epoch phases in degrees.
                constituents: vec![
                    constant("M2", 1.371, 103.1),
                    constant("N2", 0.302, 76.4),
                    constant("S2", 0.208, 139.2),
                    constant("K1", 0.133, 183.2),
                    constant("O1", 0.104, 174.8),
                    constant("L2", 0.095, 123.6),
                    constant("SA", 0.069, 131.5),
                    constant("NU2", 0.061, 81.8),
                    constant("K2", 0.058, 134.0),
                    constant("P1", 0.042, 186.8),
                    constant("M4", 0.015, 70.1),
                    constant("MS4", 0.009, 110.0),
                ],
            },
            prediction: PredictionConfig {
                window_hours: 12,
                interval_minutes: 10,
            },
        }
    }
}

fn constant(symbol: &str, amplitude_m: f64, phase_lag_deg: f64) -> HarmonicConstant {
    HarmonicConstant {
        symbol: symbol.to_string(),
        amplitude_m,
        phase_lag_deg,
    }
}

impl StationConfig {
    /// Build the engine's station record. Symbols are uppercased so catalog
    /// lookup stays exact-match.
    pub fn to_station(&self) -> Station {
        Station {
            id: self.id.clone(),
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            datum: self.datum.clone(),
            constituents: self
                .constituents
                .iter()
                .map(|c| HarmonicConstant {
                    symbol: c.symbol.to_ascii_uppercase(),
                    amplitude_m: c.amplitude_m,
                    phase_lag_deg: c.phase_lag_deg,
                })
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from tide-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("tide-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    eprintln!("Loaded configuration for station: {}", config.station.name);
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (Portland, ME)");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration (Portland, ME)");
                Self::default()
            }
        }
    }

    /// Save current configuration to tide-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("tide-config.toml", contents)?;
        eprintln!("Configuration saved to tide-config.toml");
        Ok(())
    }
}
