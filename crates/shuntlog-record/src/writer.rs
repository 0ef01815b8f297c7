use std::io::Write;

use bytes::BytesMut;

use crate::encode::encode_snapshot;
use crate::error::EncodeError;
use crate::snapshot::RawSnapshot;

/// Writes complete snapshot blocks to any `Write` sink.
pub struct SnapshotWriter<T> {
    inner: T,
    buf: BytesMut,
    channel_count: usize,
    written: u64,
}

impl<T: Write> SnapshotWriter<T> {
    /// Create a writer for `channel_count` channels per snapshot.
    pub fn new(inner: T, channel_count: usize) -> Self {
        Self {
            inner,
            buf: BytesMut::new(),
            channel_count,
            written: 0,
        }
    }

    /// Frame and write one snapshot (blocking).
    pub fn write_snapshot(&mut self, raw: &RawSnapshot) -> Result<(), EncodeError> {
        if raw.channels.len() != self.channel_count {
            return Err(EncodeError::ChannelCount {
                expected: self.channel_count,
                actual: raw.channels.len(),
            });
        }

        self.buf.clear();
        encode_snapshot(raw, &mut self.buf)?;
        self.inner.write_all(&self.buf)?;
        self.written += 1;
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<(), EncodeError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Number of snapshots written so far.
    pub fn snapshots_written(&self) -> u64 {
        self.written
    }

    /// Consume the writer and return the underlying sink.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
