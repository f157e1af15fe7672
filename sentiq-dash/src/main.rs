//! sentiq-dash - Sentiment dashboard in the terminal
//!
//! Prints batch metrics (platform counts, overall split, per-aspect bars)
//! or a random sample of analyzed reviews.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sentiq_common::config::{load_toml_config, CliOverrides, ClientConfig};
use sentiq_dash::metrics::MetricsSummary;
use sentiq_dash::query::DEFAULT_REVIEW_LIMIT;
use sentiq_dash::reviews::review_rows;
use sentiq_dash::{view, DashboardClient, MetricsQuery, PlatformFilter, ReviewQuery};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sentiq-dash")]
#[command(about = "Sentiment dashboard for an analyzed review batch")]
#[command(version)]
struct Args {
    /// API base URL, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    api_url: Option<String>,

    /// Batch to report on
    #[arg(short, long)]
    batch: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// TOML config file
    #[arg(short, long, env = "SENTIQ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Platform counts, overall sentiment and aspect breakdown
    Metrics {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long, default_value = "2024-01-01")]
        from: NaiveDate,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, default_value = "2024-12-31")]
        to: NaiveDate,

        /// Platform name or "all"
        #[arg(short, long, default_value = "all")]
        platform: PlatformFilter,
    },

    /// Random sample of reviews with per-aspect badges
    Reviews {
        /// Platform name or "all"
        #[arg(short, long, default_value = "all")]
        platform: PlatformFilter,

        /// Number of reviews to sample
        #[arg(short, long, default_value_t = DEFAULT_REVIEW_LIMIT)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cli = CliOverrides {
        api_url: args.api_url.clone(),
        session_id: None,
        batch_id: args.batch.clone(),
        request_timeout_secs: args.timeout,
    };
    // Logging level comes from the resolved config, so resolve before tracing init
    let config = load_toml_config(args.config.as_deref())
        .and_then(|toml_config| ClientConfig::resolve(&cli, &toml_config));
    let log_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("sentiq_dash={0},sentiq_common={0}", log_level).into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting sentiq-dash v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = config.context("Failed to load configuration")?;
    info!(api_url = %config.api_url, batch_id = %config.batch_id, "Configuration resolved");

    let client = DashboardClient::from_config(&config).context("Failed to initialize client")?;

    match args.command {
        Command::Metrics { from, to, platform } => {
            let query = MetricsQuery::new(from, to, platform)?;
            let metrics = client
                .get_metrics(&query)
                .await
                .context("Failed to load batch metrics")?;
            print!("{}", view::render_metrics(&MetricsSummary::from_metrics(&metrics)));
        }
        Command::Reviews { platform, limit } => {
            let query = ReviewQuery::new(platform, limit)?;
            let reviews = client
                .get_reviews(&query)
                .await
                .context("Failed to load reviews")?;
            print!("{}", view::render_reviews(&review_rows(&reviews)));
        }
    }

    Ok(())
}
