//! Synthetic capture example: writes a short five-channel capture and reads it back.
//!
//! Run with:
//!   cargo run --example synth-capture

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use shuntlog::record::{
    RawChannel, RawSnapshot, SnapshotReader, SnapshotWriter, DEFAULT_CHANNEL_COUNT,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join(format!("shuntlog-synth-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join("20230723T124600.bin0");

    let mut writer = SnapshotWriter::new(BufWriter::new(File::create(&path)?), DEFAULT_CHANNEL_COUNT);
    for minute in 0..10 {
        let channels = (0..DEFAULT_CHANNEL_COUNT as i32)
            .map(|ch| RawChannel {
                // ~12.8 V bus, a few amps that drift per channel
                bus_raw: 10_240,
                shunt_raw: 1_000 * (ch + 1) + 50 * minute,
            })
            .collect();
        writer.write_snapshot(&RawSnapshot {
            timestamp: 1_690_116_360 + 60 * minute,
            channels,
        })?;
    }
    writer.flush()?;
    eprintln!(
        "[synth] wrote {} snapshots to {}",
        writer.snapshots_written(),
        path.display()
    );

    for snapshot in SnapshotReader::new(BufReader::new(File::open(&path)?)) {
        let snapshot = snapshot?;
        let total: f64 = snapshot.channels.iter().map(|c| c.power_watts).sum();
        eprintln!(
            "[synth] {} total power {:.1} W",
            snapshot.timestamp_string(),
            total
        );
    }

    let _ = fs::remove_dir_all(&dir);
    Ok(())
}
