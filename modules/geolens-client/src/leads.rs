use tracing::info;
use uuid::Uuid;

use geolens_common::error::Result;
use geolens_common::{JobSnapshot, Lead, LeadOverview, LeadSubmission};

use crate::GeoLensClient;

impl GeoLensClient {
    /// Submit the lead form. The server stores the lead, kicks off an
    /// analysis job in the background, and returns the stored lead.
    pub async fn submit_lead(&self, submission: &LeadSubmission) -> Result<Lead> {
        let lead: Lead = self.transport().post("/leads", submission).await?;
        info!(lead_id = %lead.id, url = lead.url.as_str(), "Lead submitted, analysis queued");
        Ok(lead)
    }

    /// List captured leads, newest first, each with its latest job and any
    /// finished reports.
    pub async fn leads(&self) -> Result<Vec<LeadOverview>> {
        self.transport().get("/leads").await
    }

    /// The submission response does not carry a job id: the background
    /// task creates the job after the lead lands. It shows up on the lead's
    /// overview row, which is where the funnel picks it up.
    pub async fn latest_job_for_lead(&self, lead_id: Uuid) -> Result<Option<JobSnapshot>> {
        let leads = self.leads().await?;
        Ok(leads
            .into_iter()
            .find(|overview| overview.lead.id == lead_id)
            .and_then(|overview| overview.latest_job))
    }
}
