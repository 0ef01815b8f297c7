use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shuntlog_record::SnapshotReader;
use tracing::{info, warn};

use crate::cmd::{drain, open_input, ConvertArgs};
use crate::exit::{decode_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_summary, CsvSink, OutputFormat, Summary};

pub fn run(args: ConvertArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.calibration.decoder_config()?;
    let output = match args.output {
        Some(path) => path,
        None => default_output_path(&args.input)?,
    };

    let input = open_input(&args.input)?;
    let file = File::create(&output)
        .map_err(|err| io_error(&format!("failed to create {}", output.display()), err))?;
    let mut sink = CsvSink::new(BufWriter::new(file), config.channel_count)?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!(
        input = %args.input.display(),
        output = %output.display(),
        channels = config.channel_count,
        "converting capture"
    );
    let mut reader = SnapshotReader::with_config(input, config);
    let scan = drain(&mut reader, &running, |snapshot| sink.write(snapshot))?;
    let rows = sink.rows();
    sink.finish()?;

    if scan.interrupted {
        warn!(snapshots = rows, "conversion interrupted");
    }

    print_summary(
        &Summary {
            input: args.input.display().to_string(),
            output: Some(output.display().to_string()),
            snapshots: rows,
            first: scan.first,
            last: scan.last,
            error: scan.error.as_ref().map(ToString::to_string),
        },
        format,
    );

    match scan.error {
        Some(err) => Err(decode_error(
            &format!("conversion stopped after {rows} snapshots"),
            err,
        )),
        None => {
            info!(snapshots = rows, "conversion complete");
            Ok(SUCCESS)
        }
    }
}

/// `capture.bin0` becomes `capture.csv`; any other name gets a `.csv` extension.
pub fn default_output_path(input: &Path) -> CliResult<PathBuf> {
    if input == Path::new("-") {
        return Err(CliError::new(
            USAGE,
            "--output is required when reading from stdin",
        ));
    }
    if input.extension().is_some_and(|ext| ext == "csv") {
        return Err(CliError::new(
            USAGE,
            format!("refusing to overwrite input {}", input.display()),
        ));
    }
    Ok(input.with_extension("csv"))
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
