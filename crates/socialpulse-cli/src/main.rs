mod dashboard;
mod input;
mod panels;
mod proxy;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::dashboard::{Dashboard, View};

#[derive(Debug, Parser)]
#[command(name = "socialpulse")]
#[command(about = "Terminal dashboards for Twitter/X, Instagram and YouTube stats")]
struct Cli {
    /// Base URL of the socialpulse proxy server.
    #[arg(
        long,
        global = true,
        env = "SOCIALPULSE_SERVER_URL",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Base URL of the virality scoring service.
    #[arg(
        long,
        global = true,
        env = "SOCIALPULSE_ML_URL",
        default_value = socialpulse_upstream::virality::DEFAULT_BASE_URL
    )]
    ml_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show stats for a tweet or profile URL.
    Twitter { url: String },
    /// Show stats for an Instagram username or profile URL.
    Instagram { username: String },
    /// Show stats for a YouTube video URL or ID.
    Youtube { video: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let board = Dashboard::new(&cli.server, &cli.ml_url)?;

    eprintln!("Loading...");
    let view = match &cli.command {
        Commands::Twitter { url } => board.twitter(url).await,
        Commands::Instagram { username } => board.instagram(username).await,
        Commands::Youtube { video } => board.youtube(video).await,
    };

    Ok(show(&view))
}

/// Prints `view` and maps it to the process exit status.
fn show(view: &View) -> ExitCode {
    match view {
        View::Panel(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        View::Failed { message, raw } => {
            print!("{}", panels::error_box(message));
            if let Some(raw) = raw {
                match serde_json::to_string_pretty(raw) {
                    Ok(pretty) => println!("{pretty}"),
                    Err(e) => tracing::warn!(error = %e, "could not format raw response"),
                }
            }
            ExitCode::FAILURE
        }
    }
}
