use std::path::PathBuf;

use shuntlog_frame::FrameError;

/// Errors that end a snapshot stream.
///
/// `index` is the zero-based snapshot number and `offset` the stream byte
/// offset of the block the error was found in.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A frame, or the block terminator, is malformed.
    #[error("snapshot {index} (byte {offset}): {source}")]
    Framing {
        index: u64,
        offset: u64,
        source: FrameError,
    },

    /// The decoded fields do not sum to the stored trailer.
    #[error("snapshot {index} (byte {offset}): checksum mismatch (trailer {expected}, computed {actual})")]
    ChecksumMismatch {
        index: u64,
        offset: u64,
        /// Value stored in the trailer.
        expected: i64,
        /// Sum recomputed from the decoded fields.
        actual: i64,
    },

    /// The stream ended part-way through a block.
    #[error("snapshot {index} (byte {offset}): truncated ({available} of {expected} bytes)")]
    TruncatedSnapshot {
        index: u64,
        offset: u64,
        expected: usize,
        available: usize,
    },

    /// Bytes remain in the block after the terminator.
    #[error("snapshot {index} (byte {offset}): {remaining} excess bytes after terminator")]
    ExcessData {
        index: u64,
        offset: u64,
        remaining: usize,
    },

    /// The timestamp cannot be represented as a UTC date-time.
    ///
    /// Every `i32` second count fits chrono's range, so the five-channel
    /// wire format never produces this; it guards the `Option` returned by
    /// the conversion.
    #[error("snapshot {index} (byte {offset}): timestamp {seconds} out of range")]
    InvalidTimestamp {
        index: u64,
        offset: u64,
        seconds: i64,
    },

    /// Reading from the byte source failed.
    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reader was built with a configuration that fails validation.
    #[error("invalid decoder configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur while writing snapshots.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A field could not be framed.
    #[error("failed to frame field: {0}")]
    Frame(#[from] FrameError),

    /// The snapshot does not carry the configured number of channels.
    #[error("snapshot has {actual} channels, expected {expected}")]
    ChannelCount { expected: usize, actual: usize },

    /// Writing to the sink failed.
    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in calibration or decoder configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The calibration file could not be read.
    #[error("failed to read calibration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The calibration document is not valid JSON.
    #[error("calibration is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A calibration constant is zero, negative where it must not be, or not finite.
    #[error("invalid calibration value {name} = {value}")]
    InvalidValue { name: &'static str, value: f64 },

    /// At least one channel is required.
    #[error("channel count must be at least 1")]
    NoChannels,

    /// More channels than any supported device records.
    #[error("channel count {count} exceeds the maximum of {max}")]
    TooManyChannels { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
