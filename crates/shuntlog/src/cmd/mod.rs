use clap::{Args, Subcommand};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use shuntlog_record::{
    Calibration, DecodeError, DecoderConfig, Snapshot, SnapshotReader, DEFAULT_CHANNEL_COUNT,
};

use crate::exit::{config_error, io_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod convert;
pub mod dump;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a binary capture to CSV.
    Convert(ConvertArgs),
    /// Print decoded snapshots.
    Dump(DumpArgs),
    /// Validate a capture without writing output.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Convert(args) => convert::run(args, format),
        Command::Dump(args) => dump::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Hardware calibration, layered as defaults < `--calibration` file < flags/env.
#[derive(Args, Debug, Default)]
pub struct CalibrationArgs {
    /// JSON file with calibration constants.
    #[arg(long, value_name = "FILE", env = "SHUNTLOG_CALIBRATION")]
    pub calibration: Option<PathBuf>,
    /// Shunt resistance in ohms.
    #[arg(long, value_name = "OHMS", env = "SHUNTLOG_SHUNT_OHMS")]
    pub shunt_ohms: Option<f64>,
    /// Volts per LSB of the shunt ADC.
    #[arg(long, value_name = "VOLTS", env = "SHUNTLOG_SHUNT_VOLTS_PER_LSB")]
    pub shunt_volts_per_lsb: Option<f64>,
    /// Volts per LSB of the bus ADC.
    #[arg(long, value_name = "VOLTS", env = "SHUNTLOG_BUS_VOLTS_PER_LSB")]
    pub bus_volts_per_lsb: Option<f64>,
    /// Channels recorded per snapshot.
    #[arg(long, value_name = "N", env = "SHUNTLOG_CHANNELS", default_value_t = DEFAULT_CHANNEL_COUNT)]
    pub channels: usize,
}

impl CalibrationArgs {
    pub fn decoder_config(&self) -> CliResult<DecoderConfig> {
        let mut calibration = match &self.calibration {
            Some(path) => Calibration::from_file(path)
                .map_err(|err| config_error("invalid calibration", err))?,
            None => Calibration::default(),
        };
        if let Some(ohms) = self.shunt_ohms {
            calibration.shunt_ohms = ohms;
        }
        if let Some(volts) = self.shunt_volts_per_lsb {
            calibration.shunt_volts_per_lsb = volts;
        }
        if let Some(volts) = self.bus_volts_per_lsb {
            calibration.bus_volts_per_lsb = volts;
        }

        let config = DecoderConfig {
            calibration,
            channel_count: self.channels,
        };
        config
            .validate()
            .map_err(|err| config_error("invalid calibration", err))?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Binary capture to read (`-` for stdin).
    pub input: PathBuf,
    /// CSV file to write. Default: the input path with `.bin0` replaced by `.csv`.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub calibration: CalibrationArgs,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Binary capture to read (`-` for stdin).
    pub input: PathBuf,
    /// Stop after N snapshots.
    #[arg(long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub calibration: CalibrationArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Binary capture to read (`-` for stdin).
    pub input: PathBuf,
    #[command(flatten)]
    pub calibration: CalibrationArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Open a capture for reading; `-` reads stdin.
pub fn open_input(path: &Path) -> CliResult<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(std::io::stdin().lock()));
    }
    let file = File::open(path)
        .map_err(|err| io_error(&format!("failed to open {}", path.display()), err))?;
    Ok(Box::new(BufReader::new(file)))
}

/// What a pass over a capture saw.
#[derive(Debug, Default)]
pub struct Scan {
    pub first: Option<String>,
    pub last: Option<String>,
    pub error: Option<DecodeError>,
    pub interrupted: bool,
}

/// Hand every snapshot to `sink` until the stream ends or fails, or `running` is cleared.
///
/// A decode failure is recorded in the returned [`Scan`]; only `sink` errors abort.
pub fn drain<R: Read>(
    reader: &mut SnapshotReader<R>,
    running: &AtomicBool,
    mut sink: impl FnMut(&Snapshot) -> CliResult<()>,
) -> CliResult<Scan> {
    let mut scan = Scan::default();
    loop {
        if !running.load(Ordering::SeqCst) {
            scan.interrupted = true;
            break;
        }
        match reader.read_snapshot() {
            Ok(Some(snapshot)) => {
                let stamp = snapshot.timestamp_string();
                if scan.first.is_none() {
                    scan.first = Some(stamp.clone());
                }
                scan.last = Some(stamp);
                sink(&snapshot)?;
            }
            Ok(None) => break,
            Err(err) => {
                scan.error = Some(err);
                break;
            }
        }
    }
    Ok(scan)
}
