use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redgreen::{commands, config::ReportConfig};

#[derive(Parser)]
#[command(name = "redgreen")]
#[command(about = "Static HTML feature tracker and bug reports from a project-tracking service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a red/green feature tracker page per release series
    Features {
        /// Series to report (defaults to the configured series)
        series: Vec<String>,
    },
    /// Write the top bugs page from a bug list file (`<id>:<stakeholder>:<notes>` per line)
    Bugs {
        /// Path to the bug list file
        file: PathBuf,
    },
}

/// Initialize tracing with output to stderr.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "redgreen=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = ReportConfig::load()?;

    match cli.command {
        Commands::Features { series } => {
            let written = commands::features::run(&config, &series).await?;
            tracing::info!("Wrote {} feature tracker page(s)", written.len());
        }
        Commands::Bugs { file } => {
            commands::bugs::run(&config, &file).await?;
        }
    }

    Ok(())
}
