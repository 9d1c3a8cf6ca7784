//! Build script for work-persona
//!
//! Embeds build-time information into the binary so `work-persona version`
//! can report exactly which build produced a share link.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = command_output("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_branch = command_output("git", &["rev-parse", "--abbrev-ref", "HEAD"]);
    let git_dirty = git_dirty();
    let rustc_version = command_output("rustc", &["--version"]);

    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let target = env_or_unknown("TARGET");
    let profile = env_or_unknown("PROFILE");
    let host = env_or_unknown("HOST");

    println!("cargo:rustc-env=WORK_PERSONA_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=WORK_PERSONA_GIT_BRANCH={}", git_branch);
    println!("cargo:rustc-env=WORK_PERSONA_GIT_DIRTY={}", git_dirty);
    println!("cargo:rustc-env=WORK_PERSONA_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=WORK_PERSONA_TARGET={}", target);
    println!("cargo:rustc-env=WORK_PERSONA_PROFILE={}", profile);
    println!("cargo:rustc-env=WORK_PERSONA_RUSTC_VERSION={}", rustc_version);
    println!("cargo:rustc-env=WORK_PERSONA_HOST={}", host);
}

/// Trimmed stdout of a command, or "unknown" when it cannot run
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_dirty() -> &'static str {
    match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(output) if output.status.success() => {
            if output.stdout.is_empty() {
                "false"
            } else {
                "true"
            }
        }
        _ => "unknown",
    }
}

fn env_or_unknown(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| "unknown".to_string())
}
