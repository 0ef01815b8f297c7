//! Raw ADC code to engineering unit conversion.
//!
//! All conversions are plain floating-point arithmetic with no rounding or
//! clamping.

use crate::config::Calibration;
use crate::snapshot::ChannelReading;

impl Calibration {
    /// Shunt voltage in volts.
    pub fn shunt_volts(&self, shunt_raw: i32) -> f64 {
        f64::from(shunt_raw) * self.shunt_volts_per_lsb
    }

    /// Bus voltage in volts.
    pub fn bus_volts(&self, bus_raw: u32) -> f64 {
        f64::from(bus_raw) * self.bus_volts_per_lsb
    }

    /// Current through the shunt in amps.
    pub fn current_amps(&self, shunt_volts: f64) -> f64 {
        shunt_volts / self.shunt_ohms
    }

    /// Power delivered on the bus in watts.
    pub fn power_watts(&self, current_amps: f64, bus_volts: f64) -> f64 {
        current_amps * bus_volts
    }

    /// Convert one channel's raw codes.
    pub fn reading(&self, bus_raw: u32, shunt_raw: i32) -> ChannelReading {
        let shunt_volts = self.shunt_volts(shunt_raw);
        let bus_volts = self.bus_volts(bus_raw);
        let current_amps = self.current_amps(shunt_volts);
        ChannelReading {
            bus_raw,
            shunt_raw,
            shunt_volts,
            bus_volts,
            current_amps,
            power_watts: self.power_watts(current_amps, bus_volts),
        }
    }
}
