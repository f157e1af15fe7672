//! sentiq-qc - Human QC review of AI sentiment predictions
//!
//! Terminal replacement for the browser QC page: list a session's items,
//! audit one item from the command line, or run an interactive shell.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentiq_common::config::{load_toml_config, CliOverrides, ClientConfig};
use sentiq_common::events::EventBus;
use sentiq_common::Sentiment;
use sentiq_qc::shell::{self, Flow, ShellCommand};
use sentiq_qc::{build_controller, view, AuditController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

/// Command-line arguments for sentiq-qc
#[derive(Parser, Debug)]
#[command(name = "sentiq-qc")]
#[command(about = "Human QC review of AI sentiment predictions")]
#[command(version)]
struct Args {
    /// API base URL, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    api_url: Option<String>,

    /// QC session to review
    #[arg(short, long)]
    session: Option<u64>,

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
    /// Show session progress and every QC item
    List,

    /// Confirm or correct a single item
    Audit {
        /// QC item id
        item_id: u64,

        /// Human verdict; defaults to the AI prediction (confirm)
        #[arg(short = 'S', long)]
        sentiment: Option<Sentiment>,
    },

    /// Interactive audit session
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cli = CliOverrides {
        api_url: args.api_url.clone(),
        session_id: args.session,
        batch_id: None,
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
                format!("sentiq_qc={0},sentiq_common={0}", log_level).into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting sentiq-qc v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = config.context("Failed to load configuration")?;
    info!(api_url = %config.api_url, session_id = config.session_id, "Configuration resolved");

    let mut controller = build_controller(&config, EventBus::default())
        .context("Failed to initialize QC client")?;

    match args.command {
        Command::List => {
            controller
                .load(config.session_id)
                .await
                .context("Failed to load QC items")?;
            println!("{}", shell::render_session(&controller));
        }
        Command::Audit { item_id, sentiment } => {
            controller
                .load(config.session_id)
                .await
                .context("Failed to load QC items")?;
            run_audit(&mut controller, item_id, sentiment).await?;
        }
        Command::Shell => {
            if let Err(e) = controller.load(config.session_id).await {
                eprintln!("Error: failed to load QC items: {} (use 'reload' to retry)", e);
            }
            run_shell(&mut controller).await?;
        }
    }

    Ok(())
}

/// Open, select, submit: one audit without interaction
async fn run_audit(
    controller: &mut AuditController,
    item_id: u64,
    sentiment: Option<Sentiment>,
) -> Result<()> {
    controller
        .open(item_id)
        .map(|_| ())
        .with_context(|| format!("Cannot audit item #{}", item_id))?;
    if let Some(item) = controller.current_item() {
        print!("{}", view::render_modal(item, controller.state()));
    }

    if let Some(sentiment) = sentiment {
        controller.select(sentiment)?;
    }

    let outcome = controller.submit().await.context("Error saving data")?;
    println!("{}", shell::describe_outcome(&outcome));
    Ok(())
}

async fn run_shell(controller: &mut AuditController) -> Result<()> {
    println!("{}", shell::render_session(controller));
    println!("Type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("qc> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                error!("{}", e);
                println!("Error: {}", e);
                continue;
            }
        };

        let (flow, output) = shell::execute(controller, command).await;
        if !output.is_empty() {
            println!("{}", output);
        }
        if flow == Flow::Quit {
            break;
        }
    }

    info!("QC shell closed");
    Ok(())
}
