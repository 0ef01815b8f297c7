use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Size of one zero marker.
pub const PADDING_SIZE: usize = 4;

/// Size of the length field.
pub const LENGTH_SIZE: usize = 2;

/// Framing bytes around every payload: two zero markers plus the length.
pub const FRAME_OVERHEAD: usize = PADDING_SIZE + LENGTH_SIZE + PADDING_SIZE;

/// Value both zero markers must carry.
pub const PADDING: i32 = 0;

/// Literal bytes closing every snapshot block.
pub const TERMINATOR: [u8; 2] = *b"\r\n";

/// Encode one payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬───────────┬─────────────────┬──────────────┐
/// │ Zero (4B LE) │ Length    │ Payload         │ Zero (4B LE) │
/// │ 0x00000000   │ (2B LE)   │ (Length bytes)  │ 0x00000000   │
/// └──────────────┴───────────┴─────────────────┴──────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let len = i16::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: i16::MAX as usize,
    })?;
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_i32_le(PADDING);
    dst.put_i16_le(len);
    dst.put_slice(payload);
    dst.put_i32_le(PADDING);
    Ok(())
}

/// Decode one frame whose payload must be exactly `expected_len` bytes.
///
/// Consumes the frame from `src` and returns its payload. On a malformed
/// frame, nothing past the offending field is consumed.
pub fn decode_frame<B: Buf>(src: &mut B, expected_len: usize) -> Result<Bytes> {
    ensure_remaining(src, PADDING_SIZE)?;
    let leading = src.get_i32_le();
    if leading != PADDING {
        return Err(FrameError::BadLeadingPadding(leading));
    }

    ensure_remaining(src, LENGTH_SIZE)?;
    let declared = src.get_i16_le();
    if usize::try_from(declared).ok() != Some(expected_len) {
        return Err(FrameError::LengthMismatch {
            expected: expected_len,
            actual: declared,
        });
    }

    ensure_remaining(src, expected_len + PADDING_SIZE)?;
    let payload = src.copy_to_bytes(expected_len);

    let trailing = src.get_i32_le();
    if trailing != PADDING {
        return Err(FrameError::BadTrailingPadding(trailing));
    }

    Ok(payload)
}

/// Append the snapshot terminator.
pub fn encode_terminator(dst: &mut BytesMut) {
    dst.put_slice(&TERMINATOR);
}

/// Consume and check the snapshot terminator.
pub fn decode_terminator<B: Buf>(src: &mut B) -> Result<()> {
    ensure_remaining(src, TERMINATOR.len())?;
    let mut found = [0u8; 2];
    src.copy_to_slice(&mut found);
    if found != TERMINATOR {
        return Err(FrameError::BadTerminator(found));
    }
    Ok(())
}

fn ensure_remaining<B: Buf>(src: &B, needed: usize) -> Result<()> {
    let available = src.remaining();
    if available < needed {
        return Err(FrameError::Truncated { needed, available });
    }
    Ok(())
}
