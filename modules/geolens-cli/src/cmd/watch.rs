// Live view over one analysis job: progress bar + stage checklist while the
// poller runs, report rendered in place once it completes. Ctrl-C tears the
// view down through the poller's cancellation token, so a tick landing
// after interrupt cannot navigate anywhere.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use geolens_client::GeoLensClient;
use geolens_common::{Config, JobSnapshot};
use geolens_watch::{JobPoller, PipelineStage, PollOutcome, ReportNavigator};

use crate::render;

/// The CLI's "report page": fetch and render in the same terminal. The
/// poller calls this at most once, after the settle delay.
struct TerminalNavigator {
    client: Arc<GeoLensClient>,
    bar: ProgressBar,
}

#[async_trait]
impl ReportNavigator for TerminalNavigator {
    async fn open_report(&self, report_id: Uuid) {
        self.bar.finish_and_clear();
        match self.client.report(report_id).await {
            Ok(report) => render::report(&report),
            Err(error) => {
                eprintln!(
                    "{} report {report_id} could not be loaded: {error}",
                    style("✗").red()
                );
            }
        }
    }
}

pub async fn run(client: Arc<GeoLensClient>, config: &Config, job_id: Uuid) -> Result<()> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/dim} {pos:>3}% {msg}")
            .expect("static progress template"),
    );

    let navigator = Arc::new(TerminalNavigator {
        client: client.clone(),
        bar: bar.clone(),
    });
    let poller = Arc::new(
        JobPoller::new(client, navigator).with_timing(
            Duration::from_secs(config.poll_interval_secs),
            Duration::from_secs(config.settle_delay_secs),
        ),
    );
    let mut updates = poller.subscribe();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let mut run = {
        let poller = poller.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { poller.run(job_id, cancel).await })
    };

    let outcome = loop {
        tokio::select! {
            finished = &mut run => break finished?,
            changed = updates.changed() => {
                if changed.is_err() {
                    continue;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    paint(&bar, &snapshot);
                }
            }
        }
    };

    bar.finish_and_clear();
    match outcome {
        PollOutcome::ReportReady { report_id } => {
            println!();
            println!(
                "{} full report: geolens report {report_id} --export pdf",
                style("→").dim()
            );
            Ok(())
        }
        PollOutcome::CompletedWithoutReport => {
            println!(
                "{} analysis completed, but the server attached no report. \
                 Check `geolens leads` later.",
                style("!").yellow()
            );
            Ok(())
        }
        PollOutcome::Failed { message } => {
            println!("{} analysis failed: {message}", style("✗").red());
            Ok(())
        }
        PollOutcome::Cancelled => {
            println!("{} watch cancelled", style("!").yellow());
            Ok(())
        }
        PollOutcome::FetchFailed(error) => {
            println!("{} could not load job status: {error}", style("✗").red());
            Err(error.into())
        }
    }
}

fn paint(bar: &ProgressBar, snapshot: &JobSnapshot) {
    bar.set_position(u64::from(snapshot.progress));
    let current = PipelineStage::ALL
        .iter()
        .rev()
        .find(|stage| stage.reached(snapshot.progress))
        .copied()
        .unwrap_or(PipelineStage::Crawling);
    bar.set_message(format!("{} · {}", snapshot.status, current.label()));
}
