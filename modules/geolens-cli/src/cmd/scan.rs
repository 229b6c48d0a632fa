use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use console::style;

use geolens_client::GeoLensClient;
use geolens_common::{Config, LeadSubmission};

use super::watch;

#[derive(Args)]
pub struct ScanArgs {
    /// Website to analyze
    pub url: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub company: Option<String>,
}

pub async fn run(client: Arc<GeoLensClient>, config: &Config, args: ScanArgs) -> Result<()> {
    let lead = client
        .submit_lead(&LeadSubmission {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            company: args.company,
            url: args.url.clone(),
            consent: true,
        })
        .await?;

    println!(
        "{} analysis queued for {}",
        style("✓").green(),
        style(&args.url).bold()
    );

    // The job is created by a background task after the lead lands; give it
    // a few beats to show up on the lead's overview row.
    let mut job = None;
    for _ in 0..10 {
        if let Some(found) = client.latest_job_for_lead(lead.id).await? {
            job = Some(found);
            break;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    let Some(job) = job else {
        bail!("no analysis job appeared for lead {}", lead.id);
    };

    watch::run(client, config, job.id).await
}
