//! Zero-padded, length-delimited field framing for shunt-monitor capture logs.
//!
//! Every scalar in a capture is wrapped in its own frame:
//! - A 4-byte little-endian zero marker
//! - A 2-byte little-endian payload length, which must equal the field width
//! - The little-endian payload
//! - A second 4-byte little-endian zero marker
//!
//! Field decoders add each value into a per-snapshot [`Checksum`], which is
//! compared against the 64-bit trailer that closes the snapshot.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod field;

pub use checksum::Checksum;
pub use codec::{
    decode_frame, decode_terminator, encode_frame, encode_terminator, FRAME_OVERHEAD,
    LENGTH_SIZE, PADDING, PADDING_SIZE, TERMINATOR,
};
pub use error::{FrameError, Result};
pub use field::{
    decode_checksum, decode_field, decode_i16, decode_i32, decode_i64, decode_i8, decode_u32,
    encode_checksum, encode_field, Field,
};
