use std::sync::Arc;

use anyhow::Result;
use console::style;

use geolens_client::GeoLensClient;
use geolens_common::JobStatus;

pub async fn run(client: Arc<GeoLensClient>) -> Result<()> {
    let leads = client.leads().await?;
    if leads.is_empty() {
        println!("No leads captured yet.");
        return Ok(());
    }

    for overview in leads {
        let status = match &overview.latest_job {
            Some(job) => match job.status {
                JobStatus::Completed => style(job.status.as_str()).green(),
                JobStatus::Failed => style(job.status.as_str()).red(),
                _ => style(job.status.as_str()).yellow(),
            },
            None => style("no job").dim(),
        };
        println!(
            "{}  {}  {} <{}>  [{}]",
            style(overview.lead.id).dim(),
            style(&overview.lead.url).bold(),
            overview.lead.first_name,
            overview.lead.email,
            status
        );
        for report in &overview.reports {
            println!(
                "    report {}  global score {:.1}/10",
                style(report.id).dim(),
                report.scores.global_score
            );
        }
    }
    Ok(())
}
