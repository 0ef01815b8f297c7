use std::sync::atomic::{AtomicBool, Ordering};

use shuntlog_record::SnapshotReader;

use crate::cmd::{drain, open_input, DumpArgs};
use crate::exit::{decode_error, CliResult, SUCCESS};
use crate::output::{print_snapshot, CsvSink, OutputFormat};

pub fn run(args: DumpArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.calibration.decoder_config()?;
    let input = open_input(&args.input)?;
    let mut reader = SnapshotReader::with_config(input, config);

    let mut csv = match format {
        OutputFormat::Csv => Some(CsvSink::new(std::io::stdout().lock(), config.channel_count)?),
        _ => None,
    };

    let running = AtomicBool::new(args.count != Some(0));
    let mut printed = 0usize;
    let scan = drain(&mut reader, &running, |snapshot| {
        match csv.as_mut() {
            Some(sink) => sink.write(snapshot)?,
            None => print_snapshot(snapshot, format),
        }
        printed = printed.saturating_add(1);
        if args.count.is_some_and(|count| printed >= count) {
            running.store(false, Ordering::SeqCst);
        }
        Ok(())
    })?;

    if let Some(sink) = csv {
        sink.finish()?;
    }

    match scan.error {
        Some(err) => Err(decode_error(
            &format!("decode failed after {printed} snapshots"),
            err,
        )),
        None => Ok(SUCCESS),
    }
}
