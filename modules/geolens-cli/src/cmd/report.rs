use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::style;
use uuid::Uuid;

use geolens_client::{GeoLensClient, ReportExport};
use geolens_common::GeoLensError;

use crate::render;

#[derive(Args)]
pub struct ReportArgs {
    /// Report id
    pub report_id: Uuid,

    /// Download an alternate render instead of printing: pdf, docx, dashboard
    #[arg(long)]
    pub export: Option<ReportExport>,

    /// Output path for --export (defaults to geo-report-<id>.<ext>)
    #[arg(long)]
    pub out: Option<String>,
}

pub async fn run(client: Arc<GeoLensClient>, args: ReportArgs) -> Result<()> {
    match args.export {
        Some(format) => {
            let bytes = client.export_report(args.report_id, format).await?;
            let path = args.out.unwrap_or_else(|| {
                format!("geo-report-{}.{}", args.report_id, format.file_extension())
            });
            std::fs::write(&path, bytes)?;
            println!("{} wrote {path}", style("✓").green());
        }
        None => match client.report(args.report_id).await {
            Ok(report) => render::report(&report),
            Err(GeoLensError::NotFound(_)) => {
                println!(
                    "{} report not found — `geolens leads` lists your reports",
                    style("✗").red()
                );
            }
            Err(error) => return Err(error.into()),
        },
    }
    Ok(())
}
