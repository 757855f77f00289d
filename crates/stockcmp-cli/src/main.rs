mod export;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::export::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "stockcmp")]
#[command(about = "Compare laminate stock between the LA and Seattle warehouses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape both warehouses, compare them, and write the report
    Run {
        /// Scrape only this region; the other side is reported as absent
        #[arg(long)]
        region: Option<String>,

        /// Print the resolved regions and URLs without making requests
        #[arg(long)]
        dry_run: bool,

        /// Also write each warehouse's raw rows as JSON
        #[arg(long)]
        snapshot: bool,

        /// Directory for report files (defaults to `STOCKCMP_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Report file layout
        #[arg(long, value_enum, default_value_t)]
        format: ReportFormat,
    },
    /// Re-run the comparison offline from two saved warehouse snapshots
    Compare {
        /// Snapshot JSON for the LA warehouse
        #[arg(long)]
        la: PathBuf,

        /// Snapshot JSON for the Seattle warehouse
        #[arg(long)]
        sa: PathBuf,

        /// Directory for report files (defaults to `STOCKCMP_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Report file layout
        #[arg(long, value_enum, default_value_t)]
        format: ReportFormat,
    },
    /// Print the validated region configuration
    Regions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = stockcmp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Run {
            region,
            dry_run,
            snapshot,
            output_dir,
            format,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            run::run_comparison(
                &config,
                &run::RunOptions {
                    region: region.as_deref(),
                    dry_run,
                    snapshot,
                    output_dir: &output_dir,
                    format,
                },
            )
            .await?;
        }
        Commands::Compare {
            la,
            sa,
            output_dir,
            format,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            run::compare_snapshots(&la, &sa, &output_dir, format)?;
        }
        Commands::Regions => run::print_regions(&config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
