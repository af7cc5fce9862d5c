//! Build script for gainwalk
//!
//! Embeds build identification shown in the startup log line.

use std::process::Command;

fn main() {
    let identification = [
        ("GIT_HASH", git_short_hash()),
        ("BUILD_TIMESTAMP", chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)),
        ("BUILD_PROFILE", std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string())),
    ];

    for (key, value) in identification {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

/// Short commit hash, or "unknown" outside a git checkout
fn git_short_hash() -> String {
    let output = match Command::new("git").args(["rev-parse", "--short=8", "HEAD"]).output() {
        Ok(output) if output.status.success() => output,
        _ => return "unknown".to_string(),
    };

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
