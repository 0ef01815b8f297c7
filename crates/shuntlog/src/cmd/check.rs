use std::sync::atomic::AtomicBool;

use shuntlog_record::{DecodeError, SnapshotReader};
use tracing::info;

use crate::cmd::{drain, open_input, CheckArgs};
use crate::exit::{decode_error, CliResult, SUCCESS};
use crate::output::{print_summary, OutputFormat, Summary};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args.calibration.decoder_config()?;
    let input = open_input(&args.input)?;
    let mut reader = SnapshotReader::with_config(input, config);

    let scan = drain(&mut reader, &AtomicBool::new(true), |_| Ok(()))?;
    let snapshots = reader.snapshots_read();
    info!(snapshots, valid = scan.error.is_none(), "capture checked");

    print_summary(
        &Summary {
            input: args.input.display().to_string(),
            output: None,
            snapshots,
            first: scan.first,
            last: scan.last,
            error: scan.error.as_ref().map(ToString::to_string),
        },
        format,
    );

    Ok(status(scan.error))
}

// Source I/O failures keep their own exit codes; anything else is invalid data.
fn status(error: Option<DecodeError>) -> i32 {
    match error {
        Some(err) => decode_error("capture check failed", err).code,
        None => SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use super::*;
    use crate::exit::{DATA_INVALID, PERMISSION_DENIED};

    struct DeniedReader;

    impl Read for DeniedReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    #[test]
    fn clean_capture_is_success() {
        assert_eq!(status(None), SUCCESS);
    }

    #[test]
    fn source_read_failure_keeps_io_code() {
        let mut reader = SnapshotReader::new(DeniedReader);
        let scan = drain(&mut reader, &AtomicBool::new(true), |_| Ok(())).unwrap();
        assert!(matches!(scan.error, Some(DecodeError::Io(_))));
        assert_eq!(status(scan.error), PERMISSION_DENIED);
    }

    #[test]
    fn corrupt_capture_is_data_invalid() {
        let mut reader = SnapshotReader::new(io::Cursor::new(vec![0u8; 10]));
        let scan = drain(&mut reader, &AtomicBool::new(true), |_| Ok(())).unwrap();
        assert_eq!(status(scan.error), DATA_INVALID);
    }
}
