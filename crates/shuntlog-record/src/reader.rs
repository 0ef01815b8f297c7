use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::decode::{decode_block, Position};
use crate::error::{DecodeError, Result};
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Done,
    Failed,
}

/// Reads validated snapshots from any `Read` source, one block at a time.
///
/// The sequence is lazy and cannot be restarted: every snapshot consumes its
/// block from the source. It ends cleanly at end of stream and ends for good
/// after the first error.
pub struct SnapshotReader<R> {
    inner: R,
    config: DecoderConfig,
    block: Vec<u8>,
    position: Position,
    state: State,
}

impl<R: Read> SnapshotReader<R> {
    /// Create a reader for the five-channel device with default calibration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, DecoderConfig::default())
    }

    /// Create a reader with explicit configuration.
    ///
    /// The configuration is validated on the first read; an invalid one ends
    /// the stream with [`DecodeError::Config`] before anything is allocated.
    pub fn with_config(inner: R, config: DecoderConfig) -> Self {
        Self {
            inner,
            block: Vec::new(),
            config,
            position: Position::default(),
            state: State::Reading,
        }
    }

    /// Read the next snapshot (blocking).
    ///
    /// Returns `Ok(None)` once the source is exhausted on a block boundary,
    /// and on every call after the stream has ended or failed.
    pub fn read_snapshot(&mut self) -> Result<Option<Snapshot>> {
        if self.state != State::Reading {
            return Ok(None);
        }

        let result = self.next_block();
        match &result {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!(snapshots = self.position.index, "end of capture");
                self.state = State::Done;
            }
            Err(err) => {
                warn!(snapshots = self.position.index, error = %err, "capture decode failed");
                self.state = State::Failed;
            }
        }
        result
    }

    fn next_block(&mut self) -> Result<Option<Snapshot>> {
        if self.block.is_empty() {
            self.config.validate()?;
            self.block = vec![0; self.config.snapshot_len()];
        }

        let at = self.position;
        let filled = fill_block(&mut self.inner, &mut self.block)?;

        if filled == 0 {
            return Ok(None);
        }
        if filled < self.block.len() {
            return Err(DecodeError::TruncatedSnapshot {
                index: at.index,
                offset: at.offset,
                expected: self.block.len(),
                available: filled,
            });
        }

        let snapshot = decode_block(&self.block, &self.config, at)?;
        debug!(
            index = at.index,
            timestamp = %snapshot.timestamp_string(),
            "decoded snapshot"
        );

        self.position.index += 1;
        self.position.offset += self.block.len() as u64;
        Ok(Some(snapshot))
    }

    /// Number of snapshots yielded so far.
    pub fn snapshots_read(&self) -> u64 {
        self.position.index
    }

    /// Stream byte offset of the next block.
    pub fn offset(&self) -> u64 {
        self.position.offset
    }

    /// Decoder configuration in use.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consume the reader and return the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for SnapshotReader<R> {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_snapshot().transpose()
    }
}

impl<R: Read> FusedIterator for SnapshotReader<R> {}

// Fill `buf` from `src`, stopping early only at end of stream.
fn fill_block<R: Read>(src: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
