use bytes::BytesMut;
use shuntlog_frame::{encode_checksum, encode_field, encode_terminator, Checksum};

use crate::error::EncodeError;
use crate::snapshot::{snapshot_len, RawSnapshot};

/// Append one complete snapshot block, checksum trailer and terminator included.
///
/// Returns the checksum written to the trailer.
pub fn encode_snapshot(raw: &RawSnapshot, dst: &mut BytesMut) -> Result<Checksum, EncodeError> {
    dst.reserve(snapshot_len(raw.channels.len()));

    let mut checksum = Checksum::new();
    encode_field(raw.timestamp, dst, &mut checksum)?;
    for channel in &raw.channels {
        encode_field(channel.bus_raw, dst, &mut checksum)?;
        encode_field(channel.shunt_raw, dst, &mut checksum)?;
    }
    encode_checksum(checksum, dst)?;
    encode_terminator(dst);

    Ok(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RawChannel;

    #[test]
    fn block_length_follows_channel_count() {
        for count in [1usize, 2, 5, 8] {
            let raw = RawSnapshot {
                timestamp: 0,
                channels: vec![RawChannel::default(); count],
            };
            let mut buf = BytesMut::new();
            encode_snapshot(&raw, &mut buf).unwrap();
            assert_eq!(buf.len(), snapshot_len(count));
            assert!(buf.ends_with(b"\r\n"));
        }
    }

    #[test]
    fn returns_written_checksum() {
        let raw = RawSnapshot {
            timestamp: 100,
            channels: vec![RawChannel {
                bus_raw: 20,
                shunt_raw: -3,
            }],
        };
        let mut buf = BytesMut::new();
        let checksum = encode_snapshot(&raw, &mut buf).unwrap();
        assert_eq!(checksum.value(), 117);
    }
}
