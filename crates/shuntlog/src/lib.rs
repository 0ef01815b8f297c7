//! Decoder for the binary capture logs written by a five-channel
//! current/voltage shunt monitor.
//!
//! # Crate Structure
//!
//! - [`frame`]: Zero-padded, length-delimited field framing and the checksum accumulator
//! - [`record`]: Snapshot decoding, validation and unit conversion
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use shuntlog::record::SnapshotReader;
//!
//! let file = BufReader::new(File::open("20230723T124600.bin0")?);
//! for snapshot in SnapshotReader::new(file) {
//!     let snapshot = snapshot?;
//!     println!("{} {:.3} A", snapshot.timestamp_string(), snapshot.channels[0].current_amps);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Re-export frame types.
pub mod frame {
    pub use shuntlog_frame::*;
}

/// Re-export snapshot types.
pub mod record {
    pub use shuntlog_record::*;
}
