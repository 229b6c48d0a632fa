//! GEO analysis terminal client.
//!
//! Submits websites for Generative Engine Optimization analysis, watches
//! jobs to completion, and renders the finished reports.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use geolens_client::GeoLensClient;
use geolens_common::Config;

mod cmd;
mod render;

#[derive(Parser)]
#[command(name = "geolens")]
#[command(about = "Generative Engine Optimization analysis client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a website for analysis and watch it complete
    Scan(cmd::scan::ScanArgs),

    /// Watch an analysis job already in flight
    Watch {
        /// Job id returned at submission time
        job_id: Uuid,
    },

    /// Show or export a finished report
    Report(cmd::report::ReportArgs),

    /// List captured leads with their latest analysis
    Leads,

    /// Log in with email and password
    Login {
        email: String,
    },

    /// Create an account (logs in on success)
    Register {
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the account behind the current session
    Whoami,

    /// Account-scoped analyses (newer API surface)
    #[command(subcommand)]
    Analyses(cmd::analyses::AnalysesCommand),

    /// Administrative operations
    #[command(subcommand)]
    Admin(cmd::admin::AdminCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("geolens=warn".parse()?))
        .init();

    let config = Config::from_env();
    config.log_redacted();

    let client = Arc::new(GeoLensClient::connect(&config)?);
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => cmd::scan::run(client, &config, args).await,
        Commands::Watch { job_id } => cmd::watch::run(client, &config, job_id).await,
        Commands::Report(args) => cmd::report::run(client, args).await,
        Commands::Leads => cmd::leads::run(client).await,
        Commands::Login { email } => cmd::account::login(client, &email).await,
        Commands::Register {
            email,
            first_name,
            last_name,
        } => cmd::account::register(client, &email, first_name, last_name).await,
        Commands::Logout => cmd::account::logout(client).await,
        Commands::Whoami => cmd::account::whoami(client).await,
        Commands::Analyses(command) => cmd::analyses::run(client, command).await,
        Commands::Admin(command) => cmd::admin::run(client, command).await,
    }
}
