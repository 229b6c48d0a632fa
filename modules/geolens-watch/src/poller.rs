use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use geolens_common::error::GeoLensError;
use geolens_common::{JobSnapshot, JobStatus};

use crate::traits::{JobSource, ReportNavigator};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Shown when a failed job carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "The analysis failed unexpectedly";

/// Where one poll run ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The job completed and the navigator was invoked for its report.
    ReportReady { report_id: Uuid },
    /// The job reported completed but referenced no report. Polling stops
    /// and nothing navigates; there is nothing to open.
    CompletedWithoutReport,
    /// The job reached the failed state; carries the message to display.
    Failed { message: String },
    /// The owning view tore down before a terminal state.
    Cancelled,
    /// A poll fetch failed. The loop does not retry on its own; transient
    /// token refresh is the transport's business, not the poller's.
    FetchFailed(GeoLensError),
}

/// Self-rescheduling poll loop over one job id.
///
/// Each tick fetches a snapshot, publishes it to subscribers, and either
/// sleeps the poll interval or finishes. Every await races the cancellation
/// token, so once the owner cancels, no further snapshot lands and no
/// navigation can fire.
pub struct JobPoller {
    source: Arc<dyn JobSource>,
    navigator: Arc<dyn ReportNavigator>,
    interval: Duration,
    settle: Duration,
    state: watch::Sender<Option<JobSnapshot>>,
}

impl JobPoller {
    pub fn new(source: Arc<dyn JobSource>, navigator: Arc<dyn ReportNavigator>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            source,
            navigator,
            interval: DEFAULT_POLL_INTERVAL,
            settle: DEFAULT_SETTLE_DELAY,
            state,
        }
    }

    /// Override the poll interval and settle delay.
    pub fn with_timing(mut self, interval: Duration, settle: Duration) -> Self {
        self.interval = interval;
        self.settle = settle;
        self
    }

    /// Observe snapshots as ticks land. Holds `None` until the first tick.
    pub fn subscribe(&self) -> watch::Receiver<Option<JobSnapshot>> {
        self.state.subscribe()
    }

    /// Poll until a terminal state, a fetch failure, or cancellation.
    pub async fn run(&self, job_id: Uuid, cancel: CancellationToken) -> PollOutcome {
        info!(%job_id, "Polling analysis job");
        loop {
            let snapshot = tokio::select! {
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                fetched = self.source.job(job_id) => match fetched {
                    Ok(snapshot) => snapshot,
                    Err(error) => {
                        warn!(%job_id, %error, "Poll fetch failed, stopping");
                        return PollOutcome::FetchFailed(error);
                    }
                },
            };

            self.state.send_replace(Some(snapshot.clone()));

            match snapshot.status {
                JobStatus::Completed => {
                    let Some(report_id) = snapshot.report_id else {
                        warn!(%job_id, "Job completed without a report reference");
                        return PollOutcome::CompletedWithoutReport;
                    };
                    // Let the completion state render before moving on.
                    tokio::select! {
                        _ = cancel.cancelled() => return PollOutcome::Cancelled,
                        _ = sleep(self.settle) => {}
                    }
                    self.navigator.open_report(report_id).await;
                    info!(%job_id, %report_id, "Report ready");
                    return PollOutcome::ReportReady { report_id };
                }
                JobStatus::Failed => {
                    let message = snapshot
                        .error
                        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                    info!(%job_id, message = message.as_str(), "Analysis failed");
                    return PollOutcome::Failed { message };
                }
                JobStatus::Pending | JobStatus::Processing => {
                    debug!(%job_id, progress = snapshot.progress, "Job still in progress");
                    tokio::select! {
                        _ = cancel.cancelled() => return PollOutcome::Cancelled,
                        _ = sleep(self.interval) => {}
                    }
                }
            }
        }
    }
}
