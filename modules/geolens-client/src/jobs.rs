use uuid::Uuid;

use geolens_common::error::Result;
use geolens_common::JobSnapshot;

use crate::GeoLensClient;

impl GeoLensClient {
    /// Fetch the current snapshot of an analysis job. This is the poll
    /// tick's only read; the snapshot is server-owned and read-only here.
    pub async fn job(&self, id: Uuid) -> Result<JobSnapshot> {
        self.transport().get(&format!("/jobs/{id}")).await
    }
}
