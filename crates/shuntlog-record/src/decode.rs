use bytes::Buf;
use chrono::DateTime;
use shuntlog_frame::{
    decode_checksum, decode_i32, decode_terminator, decode_u32, Checksum, FrameError,
};

use crate::config::DecoderConfig;
use crate::error::{DecodeError, Result};
use crate::snapshot::Snapshot;

/// Where a block sits in its stream; attached to every decode error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Zero-based snapshot number.
    pub index: u64,
    /// Stream byte offset of the block.
    pub offset: u64,
}

impl Position {
    fn framing(self, source: FrameError) -> DecodeError {
        DecodeError::Framing {
            index: self.index,
            offset: self.offset,
            source,
        }
    }
}

/// Decode and validate one standalone snapshot block.
///
/// `block` must hold exactly one block of `config.snapshot_len()` bytes.
pub fn decode_snapshot(block: &[u8], config: &DecoderConfig) -> Result<Snapshot> {
    decode_block(block, config, Position::default())
}

/// Decode one block located at `at` in its stream.
pub fn decode_block(block: &[u8], config: &DecoderConfig, at: Position) -> Result<Snapshot> {
    let expected = config.snapshot_len();
    if block.len() < expected {
        return Err(DecodeError::TruncatedSnapshot {
            index: at.index,
            offset: at.offset,
            expected,
            available: block.len(),
        });
    }

    let mut src = block;
    let mut checksum = Checksum::new();

    let seconds = decode_i32(&mut src, &mut checksum).map_err(|err| at.framing(err))?;
    let timestamp = DateTime::from_timestamp(i64::from(seconds), 0).ok_or(
        DecodeError::InvalidTimestamp {
            index: at.index,
            offset: at.offset,
            seconds: i64::from(seconds),
        },
    )?;

    let mut channels = Vec::with_capacity(config.channel_count);
    for _ in 0..config.channel_count {
        let bus_raw = decode_u32(&mut src, &mut checksum).map_err(|err| at.framing(err))?;
        let shunt_raw = decode_i32(&mut src, &mut checksum).map_err(|err| at.framing(err))?;
        channels.push(config.calibration.reading(bus_raw, shunt_raw));
    }

    let trailer = decode_checksum(&mut src).map_err(|err| at.framing(err))?;
    if !checksum.matches(trailer) {
        return Err(DecodeError::ChecksumMismatch {
            index: at.index,
            offset: at.offset,
            expected: trailer,
            actual: checksum.value(),
        });
    }

    decode_terminator(&mut src).map_err(|err| at.framing(err))?;

    if src.has_remaining() {
        return Err(DecodeError::ExcessData {
            index: at.index,
            offset: at.offset,
            remaining: src.remaining(),
        });
    }

    Ok(Snapshot {
        timestamp,
        channels,
    })
}
