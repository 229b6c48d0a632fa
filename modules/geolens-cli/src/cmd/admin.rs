use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use console::style;
use uuid::Uuid;

use geolens_client::GeoLensClient;

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List user accounts
    Users,

    /// List all analyses across accounts
    Analyses,

    /// Aggregate usage counters
    Stats,

    /// Change a user's subscription plan
    SetPlan { user_id: Uuid, plan_type: String },
}

pub async fn run(client: Arc<GeoLensClient>, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Users => {
            for user in client.admin_users().await? {
                let flag = if user.is_active { "" } else { " (inactive)" };
                println!(
                    "{}  {}  {}{flag}",
                    style(user.id).dim(),
                    user.email,
                    user.role.unwrap_or_default()
                );
            }
        }
        AdminCommand::Analyses => {
            for record in client.admin_analyses().await? {
                println!(
                    "{}  [{}]  {:>3}%",
                    style(record.id).dim(),
                    record.status,
                    record.progress
                );
            }
        }
        AdminCommand::Stats => {
            let stats = client.admin_stats().await?;
            println!("users: {}", stats.total_users);
            println!("analyses: {}", stats.total_analyses);
            println!("analyses today: {}", stats.analyses_today);
        }
        AdminCommand::SetPlan { user_id, plan_type } => {
            client.update_subscription(user_id, &plan_type).await?;
            println!("{} plan updated for {user_id}", style("✓").green());
        }
    }
    Ok(())
}
