/// Errors that can occur while decoding a framed field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The zero marker in front of the length field was not zero.
    #[error("bad leading padding (expected 0, got {0})")]
    BadLeadingPadding(i32),

    /// The declared payload length does not match the field being decoded.
    #[error("frame length mismatch (expected {expected}, got {actual})")]
    LengthMismatch { expected: usize, actual: i16 },

    /// The zero marker after the payload was not zero.
    #[error("bad trailing padding (expected 0, got {0})")]
    BadTrailingPadding(i32),

    /// The snapshot terminator was not `\r\n`.
    #[error("bad snapshot terminator (expected [0d, 0a], got {0:02x?})")]
    BadTerminator([u8; 2]),

    /// The payload does not fit the 16-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The buffer ended before the frame did.
    #[error("truncated frame ({needed} bytes needed, {available} available)")]
    Truncated { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
