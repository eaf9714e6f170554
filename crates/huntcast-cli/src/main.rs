use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use huntcast_core::trends::Period;
use huntcast_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "huntcast")]
#[command(author, version, about = "Product Hunt trending digest bot with AI commentary")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduled daemon (default when no command is given)
    Daemon,
    /// Check connectivity of all configured integrations
    Test,
    /// Fetch, analyze and publish today's digest once
    Daily,
    /// Fetch, analyze and publish this week's digest once
    Weekly,
    /// Fetch, analyze and publish this month's digest once
    Monthly,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Misconfiguration is fatal at startup, never mid-run
    config.validate()?;
    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Daemon) | None => commands::daemon::run(config).await,
        Some(Commands::Test) => commands::test::run(config).await,
        Some(Commands::Daily) => commands::report::run(config, Period::Daily).await,
        Some(Commands::Weekly) => commands::report::run(config, Period::Weekly).await,
        Some(Commands::Monthly) => commands::report::run(config, Period::Monthly).await,
    }
}
