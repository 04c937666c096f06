//! folio CLI - builds the Testeranto documentation site.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Builds the Testeranto documentation site")]
#[command(version)]
pub struct Cli {
    /// Rebuild whenever templates, styles or the README change
    #[arg(long)]
    watch: bool,

    /// Path to folio.toml config file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the default level
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::load_config(&cli.config)?;
    let site = file_config.site_config();

    if cli.watch {
        commands::watch::run(site, file_config.watch_config()).await?;
    } else {
        commands::build::run(site).await?;
    }

    Ok(())
}
