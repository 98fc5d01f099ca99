//! Development automation tasks for the `CalStats` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{anyhow, Context};

const APP_CRATE: &str = "calstats-app";
const BENCH_CRATE: &str = "calstats-core";

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("bench-check") => run_bench_check(),
        Some("sample-ics") => run_sample_ics(env::args().nth(2).map(PathBuf::from)),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("CalStats Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci           Run all CI checks (fmt, clippy, check, test, bench-check)");
    println!("    fmt          Check Rust code formatting");
    println!("    clippy       Run Clippy lints");
    println!("    test         Run all tests");
    println!("    bench-check  Compile the criterion benches without running them");
    println!("    sample-ics   Write a sample calendar file (default: target/sample.ics)");
    println!("    help         Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/5: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/5: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/5: Verifying {APP_CRATE}...");
    verify_app_crate()?;

    println!("\n==> Step 4/5: Running tests...");
    run_test()?;

    println!("\n==> Step 5/5: Compiling benches...");
    run_bench_check()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args.join(" ")))?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("cargo {} exited with {status}", args.join(" ")))
    }
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    cargo(&["fmt", "--all", "--", "--check"])
        .context("Format check failed. Run 'cargo fmt --all' to fix.")
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    cargo(&["clippy", "--workspace", "--all-targets"]).context("Clippy run failed. See output above.")
}

/// Verify the binary crate compiles on its own
fn verify_app_crate() -> anyhow::Result<()> {
    println!("Checking {APP_CRATE} compiles...");
    cargo(&["check", "-p", APP_CRATE])?;
    println!("✓ {APP_CRATE} compiles successfully");
    Ok(())
}

/// Run all workspace tests
fn run_test() -> anyhow::Result<()> {
    cargo(&["test", "--workspace"]).context("Tests failed")
}

fn run_bench_check() -> anyhow::Result<()> {
    cargo(&["bench", "-p", BENCH_CRATE, "--no-run"]).context("Benches failed to compile")
}

/// Write a small calendar file for manual runs of `calstats <file>`.
fn run_sample_ics(target: Option<PathBuf>) -> anyhow::Result<()> {
    let path = target.unwrap_or_else(|| PathBuf::from("target/sample.ics"));
    if path.extension().and_then(std::ffi::OsStr::to_str) != Some("ics") {
        anyhow::bail!("{} must end in .ics", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(&path, sample_calendar())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    report_written(&path);
    Ok(())
}

fn sample_calendar() -> String {
    let trips = [
        ("20240303", "20240310", "Lisbon"),
        ("20240312", "20240315", "Madrid"),
        ("20240401", "20240420", "Tokyo"),
    ];

    let mut content = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//calstats//sample//EN\r\n");
    for (index, (start, end, place)) in trips.iter().enumerate() {
        let _ = write!(
            content,
            "BEGIN:VEVENT\r\nUID:sample-{index}@calstats\r\nDTSTART;VALUE=DATE:{start}\r\n\
             DTEND;VALUE=DATE:{end}\r\nSUMMARY:Trip to {place}\r\nEND:VEVENT\r\n"
        );
    }
    content.push_str("END:VCALENDAR\r\n");
    content
}

fn report_written(path: &Path) {
    println!("✓ Wrote sample calendar to {}", path.display());
}
