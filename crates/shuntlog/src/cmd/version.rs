use chrono::DateTime;
use shuntlog_record::TIMESTAMP_FORMAT;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("shuntlog {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: shuntlog");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("built: {}", build_timestamp());
    println!(
        "target: {}",
        option_env!("SHUNTLOG_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);

    Ok(SUCCESS)
}

/// Build time recorded by `build.rs`, rendered like snapshot timestamps (UTC).
pub fn build_timestamp() -> String {
    format_epoch(option_env!("SHUNTLOG_BUILD_EPOCH"))
}

fn format_epoch(epoch: Option<&str>) -> String {
    epoch
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|built| built.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch() {
        assert_eq!(format_epoch(Some("1690116360")), "2023-07-23 12:46:00");
    }

    #[test]
    fn unknown_without_epoch() {
        assert_eq!(format_epoch(None), "unknown");
        assert_eq!(format_epoch(Some("soon")), "unknown");
    }
}
