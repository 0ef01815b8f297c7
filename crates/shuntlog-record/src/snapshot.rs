use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use shuntlog_frame::{Field, FRAME_OVERHEAD, TERMINATOR};

use crate::config::DEFAULT_CHANNEL_COUNT;

/// Rendering used for snapshot timestamps (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Size in bytes of one snapshot block carrying `channel_count` channels.
///
/// One frame per scalar: the timestamp, a bus and a shunt code per channel,
/// and the checksum trailer, followed by the two terminator bytes.
///
/// Saturates at `usize::MAX` for counts no block could hold; such counts are
/// rejected by [`DecoderConfig::validate`](crate::DecoderConfig::validate).
pub const fn snapshot_len(channel_count: usize) -> usize {
    let per_channel = 2 * FRAME_OVERHEAD + u32::WIDTH + i32::WIDTH;
    let fixed = 2 * FRAME_OVERHEAD + i32::WIDTH + i64::WIDTH + TERMINATOR.len();
    channel_count.saturating_mul(per_channel).saturating_add(fixed)
}

/// Size in bytes of one snapshot block from the five-channel device.
pub const SNAPSHOT_LENGTH: usize = snapshot_len(DEFAULT_CHANNEL_COUNT);

/// One channel's raw codes and the quantities derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelReading {
    pub bus_raw: u32,
    pub shunt_raw: i32,
    pub shunt_volts: f64,
    pub bus_volts: f64,
    pub current_amps: f64,
    pub power_watts: f64,
}

/// A validated snapshot: timestamp plus one reading per channel, in device order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub channels: Vec<ChannelReading>,
}

impl Snapshot {
    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Cells of the tabular record, in [`columns`] order.
    pub fn row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(1 + 4 * self.channels.len());
        row.push(self.timestamp_string());
        for channel in &self.channels {
            row.push(format_value(channel.bus_volts));
            row.push(format_value(channel.shunt_volts));
            row.push(format_value(channel.current_amps));
            row.push(format_value(channel.power_watts));
        }
        row
    }
}

/// Header of the tabular record for `channel_count` channels.
pub fn columns(channel_count: usize) -> Vec<String> {
    let mut columns = Vec::with_capacity(1 + 4 * channel_count);
    columns.push("timestamp".to_string());
    for n in 1..=channel_count {
        columns.push(format!("bus_voltage_{n}"));
        columns.push(format!("shunt_voltage_{n}"));
        columns.push(format!("current_{n}"));
        columns.push(format!("power_{n}"));
    }
    columns
}

// Shortest round-trip form that always keeps a fractional part ("1.0", not
// "1"). Exponents carry a sign and at least two digits ("2.5e-06", "1e+16"),
// so existing CSV exports stay byte-identical.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

/// Raw per-channel codes, as the device records them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawChannel {
    pub bus_raw: u32,
    pub shunt_raw: i32,
}

/// Raw snapshot contents before framing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSnapshot {
    /// Seconds since the Unix epoch.
    pub timestamp: i32,
    pub channels: Vec<RawChannel>,
}
