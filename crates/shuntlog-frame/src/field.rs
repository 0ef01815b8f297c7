use std::fmt::Debug;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::checksum::Checksum;
use crate::codec::{decode_frame, encode_frame};
use crate::error::Result;

/// A little-endian scalar carried in its own frame.
pub trait Field: Copy + Debug {
    /// Payload width in bytes.
    const WIDTH: usize;

    /// Read the value from a payload of exactly `WIDTH` bytes.
    fn from_payload(payload: Bytes) -> Self;

    /// Append the little-endian payload.
    fn put_payload(self, dst: &mut BytesMut);

    /// Contribution of this value to the snapshot checksum.
    fn checksum_term(self) -> i64;
}

macro_rules! impl_field {
    ($ty:ty, $get:ident, $put:ident) => {
        impl Field for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn from_payload(mut payload: Bytes) -> Self {
                payload.$get()
            }

            fn put_payload(self, dst: &mut BytesMut) {
                dst.$put(self);
            }

            fn checksum_term(self) -> i64 {
                i64::from(self)
            }
        }
    };
}

impl_field!(i8, get_i8, put_i8);
impl_field!(i16, get_i16_le, put_i16_le);
impl_field!(i32, get_i32_le, put_i32_le);
impl_field!(i64, get_i64_le, put_i64_le);
impl_field!(u32, get_u32_le, put_u32_le);

/// Decode one framed field and add it to `checksum`.
pub fn decode_field<T: Field, B: Buf>(src: &mut B, checksum: &mut Checksum) -> Result<T> {
    let payload = decode_frame(src, T::WIDTH)?;
    let value = T::from_payload(payload);
    checksum.add(value.checksum_term());
    trace!(width = T::WIDTH, value = ?value, "decoded field");
    Ok(value)
}

/// Encode one field and add it to `checksum`.
pub fn encode_field<T: Field>(value: T, dst: &mut BytesMut, checksum: &mut Checksum) -> Result<()> {
    let mut payload = BytesMut::with_capacity(T::WIDTH);
    value.put_payload(&mut payload);
    encode_frame(&payload, dst)?;
    checksum.add(value.checksum_term());
    Ok(())
}

pub fn decode_i8<B: Buf>(src: &mut B, checksum: &mut Checksum) -> Result<i8> {
    decode_field(src, checksum)
}

pub fn decode_i16<B: Buf>(src: &mut B, checksum: &mut Checksum) -> Result<i16> {
    decode_field(src, checksum)
}

pub fn decode_i32<B: Buf>(src: &mut B, checksum: &mut Checksum) -> Result<i32> {
    decode_field(src, checksum)
}

pub fn decode_i64<B: Buf>(src: &mut B, checksum: &mut Checksum) -> Result<i64> {
    decode_field(src, checksum)
}

pub fn decode_u32<B: Buf>(src: &mut B, checksum: &mut Checksum) -> Result<u32> {
    decode_field(src, checksum)
}

/// Decode the 64-bit checksum trailer. The trailer is not summed.
pub fn decode_checksum<B: Buf>(src: &mut B) -> Result<i64> {
    let payload = decode_frame(src, i64::WIDTH)?;
    Ok(i64::from_payload(payload))
}

/// Encode the 64-bit checksum trailer.
pub fn encode_checksum(checksum: Checksum, dst: &mut BytesMut) -> Result<()> {
    let mut payload = BytesMut::with_capacity(i64::WIDTH);
    checksum.value().put_payload(&mut payload);
    encode_frame(&payload, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FRAME_OVERHEAD;
    use crate::error::FrameError;

    #[test]
    fn widths_match_wire_sizes() {
        assert_eq!(i8::WIDTH, 1);
        assert_eq!(i16::WIDTH, 2);
        assert_eq!(i32::WIDTH, 4);
        assert_eq!(u32::WIDTH, 4);
        assert_eq!(i64::WIDTH, 8);
    }

    #[test]
    fn decodes_each_width_and_sums() {
        let mut wire = BytesMut::new();
        let mut written = Checksum::new();
        encode_field(-3i8, &mut wire, &mut written).unwrap();
        encode_field(-300i16, &mut wire, &mut written).unwrap();
        encode_field(-70_000i32, &mut wire, &mut written).unwrap();
        encode_field(5_000_000_000i64, &mut wire, &mut written).unwrap();
        encode_field(u32::MAX, &mut wire, &mut written).unwrap();
        let mut wire = wire.freeze();

        let mut sum = Checksum::new();
        assert_eq!(decode_i8(&mut wire, &mut sum).unwrap(), -3);
        assert_eq!(decode_i16(&mut wire, &mut sum).unwrap(), -300);
        assert_eq!(decode_i32(&mut wire, &mut sum).unwrap(), -70_000);
        assert_eq!(decode_i64(&mut wire, &mut sum).unwrap(), 5_000_000_000);
        assert_eq!(decode_u32(&mut wire, &mut sum).unwrap(), u32::MAX);
        assert!(wire.is_empty());

        let expected = -3 - 300 - 70_000 + 5_000_000_000 + 4_294_967_295;
        assert_eq!(sum.value(), expected);
        assert_eq!(written, sum);
    }

    #[test]
    fn unsigned_field_is_not_sign_extended() {
        let mut wire = BytesMut::new();
        encode_field(0x8000_0000u32, &mut wire, &mut Checksum::new()).unwrap();

        let mut sum = Checksum::new();
        let value = decode_u32(&mut wire.freeze(), &mut sum).unwrap();
        assert_eq!(value, 0x8000_0000);
        assert_eq!(sum.value(), 2_147_483_648);
    }

    #[test]
    fn trailer_is_not_summed() {
        let mut sum = Checksum::new();
        sum.add(1234);

        let mut wire = BytesMut::new();
        encode_checksum(sum, &mut wire).unwrap();
        assert_eq!(wire.len(), FRAME_OVERHEAD + 8);

        let mut running = Checksum::new();
        running.add(1234);
        let trailer = decode_checksum(&mut wire.freeze()).unwrap();
        assert_eq!(trailer, 1234);
        assert_eq!(running.value(), 1234);
    }

    #[test]
    fn width_mismatch_leaves_checksum_untouched() {
        let mut wire = BytesMut::new();
        encode_field(7i16, &mut wire, &mut Checksum::new()).unwrap();

        let mut sum = Checksum::new();
        let result = decode_i32(&mut wire.freeze(), &mut sum);
        assert_eq!(
            result,
            Err(FrameError::LengthMismatch {
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(sum.value(), 0);
    }
}
