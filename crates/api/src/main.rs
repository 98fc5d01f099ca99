//! CalStats - calendar upload client with an interactive trip timeline
//!
//! Main entry point for the `calstats` binary.

#![allow(clippy::print_stderr)]

use std::path::PathBuf;

use anyhow::Context;
use calstats_infra::config::{self, ConfigSource};
use calstats_lib::utils::logging::init_tracing;
use calstats_lib::{shell, AppContext};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "calstats", version, about = "Upload a calendar and explore your trips")]
struct Cli {
    /// Config file (JSON or TOML). Defaults to env, then probed files.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Calendar file to upload on startup
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let (config, source) = match cli.config {
        Some(path) => config::load_from_file(&path).map(|config| (config, ConfigSource::File(path))),
        None => config::resolve(),
    }
    .context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialize logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => debug!(error = %e, "no .env file"),
    }
    info!(%source, url = %config.channel.url, "configuration resolved");

    let mut ctx = AppContext::new(config);
    let subscription = ctx.mount().await;

    if let Some(file) = cli.file {
        if let Err(err) = ctx.select_file(file) {
            eprintln!("{}", err.user_message());
        } else if let Err(err) = ctx.start_upload().await {
            warn!(error = %err, "startup upload failed");
        }
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    shell::run(&mut ctx, subscription, stdin, &mut stdout).await.context("shell failed")?;

    ctx.unmount().await.context("failed to shut down cleanly")?;
    Ok(())
}
