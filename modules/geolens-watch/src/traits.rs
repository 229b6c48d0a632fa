// Trait abstractions for the poll loop's two side effects.
//
// JobSource — one snapshot fetch per tick, backed by the API client.
// ReportNavigator — the one-shot page transition on completion.
//
// These enable deterministic testing with MockJobSource and
// RecordingNavigator: no network, no timers beyond the loop's own.

use async_trait::async_trait;
use uuid::Uuid;

use geolens_common::error::Result;
use geolens_common::JobSnapshot;
use geolens_client::GeoLensClient;

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch the current snapshot of a job.
    async fn job(&self, id: Uuid) -> Result<JobSnapshot>;
}

#[async_trait]
impl JobSource for GeoLensClient {
    async fn job(&self, id: Uuid) -> Result<JobSnapshot> {
        GeoLensClient::job(self, id).await
    }
}

#[async_trait]
pub trait ReportNavigator: Send + Sync {
    /// Open the finished report. The poller invokes this at most once per
    /// run, after the settle delay.
    async fn open_report(&self, report_id: Uuid);
}
