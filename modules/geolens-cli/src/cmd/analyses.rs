use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use console::style;
use uuid::Uuid;

use geolens_client::GeoLensClient;

#[derive(Subcommand)]
pub enum AnalysesCommand {
    /// List the account's analyses
    List,

    /// Queue a new analysis
    Create { url: String },

    /// Show the poll status of one analysis
    Status { id: Uuid },

    /// Delete an analysis and its results
    Delete { id: Uuid },
}

pub async fn run(client: Arc<GeoLensClient>, command: AnalysesCommand) -> Result<()> {
    match command {
        AnalysesCommand::List => {
            let list = client.analyses().await?;
            if list.analyses.is_empty() {
                println!("No analyses yet.");
                return Ok(());
            }
            for record in list.analyses {
                let score = record
                    .global_score
                    .map(|s| format!("{s}/100"))
                    .unwrap_or_else(|| "—".to_string());
                println!(
                    "{}  [{}]  {:>3}%  score {score}",
                    style(record.id).dim(),
                    record.status,
                    record.progress
                );
            }
        }
        AnalysesCommand::Create { url } => {
            let record = client.create_analysis(&url).await?;
            println!("{} analysis {} queued", style("✓").green(), record.id);
        }
        AnalysesCommand::Status { id } => {
            let status = client.analysis_status(id).await?;
            println!("{}  [{}]  {}%", status.id, status.status, status.progress);
            if let Some(message) = status.error_message {
                println!("{} {message}", style("✗").red());
            }
        }
        AnalysesCommand::Delete { id } => {
            client.delete_analysis(id).await?;
            println!("{} analysis {id} deleted", style("✓").green());
        }
    }
    Ok(())
}
