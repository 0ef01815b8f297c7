//! Snapshot decoding for shunt-monitor capture logs.
//!
//! A capture is a sequence of fixed-size blocks. Each block holds a framed
//! timestamp, a framed bus and shunt ADC code per channel, a framed 64-bit
//! checksum trailer, and a `\r\n` terminator. [`SnapshotReader`] turns a byte
//! source into validated [`Snapshot`]s with readings in volts, amps and watts.
//!
//! Any malformed block ends the stream with a [`DecodeError`]; there is no
//! resynchronisation.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod reader;
pub mod snapshot;
pub mod units;
pub mod writer;

pub use config::{Calibration, DecoderConfig, DEFAULT_CHANNEL_COUNT, MAX_CHANNEL_COUNT};
pub use decode::{decode_block, decode_snapshot, Position};
pub use encode::encode_snapshot;
pub use error::{ConfigError, DecodeError, EncodeError, Result};
pub use reader::SnapshotReader;
pub use snapshot::{
    columns, snapshot_len, ChannelReading, RawChannel, RawSnapshot, Snapshot, SNAPSHOT_LENGTH,
    TIMESTAMP_FORMAT,
};
pub use writer::SnapshotWriter;
