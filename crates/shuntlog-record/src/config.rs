use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::snapshot::snapshot_len;

/// Shunt resistance fitted to every channel, in ohms.
pub const DEFAULT_SHUNT_OHMS: f64 = 1e-4;

/// 2.5 uV per LSB of the shunt ADC.
pub const DEFAULT_SHUNT_VOLTS_PER_LSB: f64 = 2.5e-6;

/// 1.25 mV per LSB of the bus ADC.
pub const DEFAULT_BUS_VOLTS_PER_LSB: f64 = 1.25e-3;

/// Channels recorded per snapshot.
pub const DEFAULT_CHANNEL_COUNT: usize = 5;

/// Largest channel count a decoder accepts.
pub const MAX_CHANNEL_COUNT: usize = 256;

/// Hardware calibration constants used to turn ADC codes into volts and amps.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Calibration {
    /// Shunt resistance in ohms.
    pub shunt_ohms: f64,
    /// Volts per LSB of the shunt voltage register.
    pub shunt_volts_per_lsb: f64,
    /// Volts per LSB of the bus voltage register.
    pub bus_volts_per_lsb: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            shunt_ohms: DEFAULT_SHUNT_OHMS,
            shunt_volts_per_lsb: DEFAULT_SHUNT_VOLTS_PER_LSB,
            bus_volts_per_lsb: DEFAULT_BUS_VOLTS_PER_LSB,
        }
    }
}

impl Calibration {
    /// Parse a calibration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let calibration: Self = serde_json::from_str(json)?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Load a calibration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that every constant is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("shunt_ohms", self.shunt_ohms),
            ("shunt_volts_per_lsb", self.shunt_volts_per_lsb),
            ("bus_volts_per_lsb", self.bus_volts_per_lsb),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        Ok(())
    }
}

/// Controls how snapshot blocks are laid out and converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoderConfig {
    /// Unit conversion constants.
    pub calibration: Calibration,
    /// Channels recorded in every snapshot.
    pub channel_count: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

impl DecoderConfig {
    /// Size in bytes of one snapshot block under this config.
    pub const fn snapshot_len(&self) -> usize {
        snapshot_len(self.channel_count)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_count == 0 {
            return Err(ConfigError::NoChannels);
        }
        if self.channel_count > MAX_CHANNEL_COUNT {
            return Err(ConfigError::TooManyChannels {
                count: self.channel_count,
                max: MAX_CHANNEL_COUNT,
            });
        }
        self.calibration.validate()
    }
}
