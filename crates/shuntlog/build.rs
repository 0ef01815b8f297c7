use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    if let Ok(target) = std::env::var("TARGET") {
        println!("cargo:rustc-env=SHUNTLOG_BUILD_TARGET={target}");
    }

    // SOURCE_DATE_EPOCH pins the stamp for reproducible builds.
    let epoch = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs())
        });
    if let Some(epoch) = epoch {
        println!("cargo:rustc-env=SHUNTLOG_BUILD_EPOCH={epoch}");
    }

    println!("cargo:rerun-if-env-changed=TARGET");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}
