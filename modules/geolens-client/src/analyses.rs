use tracing::info;
use uuid::Uuid;

use geolens_common::error::Result;
use geolens_common::{AnalysisList, AnalysisRecord, AnalysisStatus};

use crate::GeoLensClient;

// The newer, account-scoped API generation. Same job lifecycle underneath;
// snake_case wire names and integer scores instead of the legacy camelCase
// lead-funnel surface.

impl GeoLensClient {
    /// Queue an analysis for a URL under the current account.
    pub async fn create_analysis(&self, url: &str) -> Result<AnalysisRecord> {
        let record: AnalysisRecord = self
            .transport()
            .post("/analyses", &serde_json::json!({ "url": url }))
            .await?;
        info!(analysis_id = %record.id, url, "Analysis created");
        Ok(record)
    }

    /// List the account's analyses.
    pub async fn analyses(&self) -> Result<AnalysisList> {
        self.transport().get("/analyses").await
    }

    /// Fetch one analysis in full.
    pub async fn analysis(&self, id: Uuid) -> Result<AnalysisRecord> {
        self.transport().get(&format!("/analyses/{id}")).await
    }

    /// Lightweight poll payload for an analysis.
    pub async fn analysis_status(&self, id: Uuid) -> Result<AnalysisStatus> {
        self.transport().get(&format!("/analyses/{id}/status")).await
    }

    /// Delete an analysis and its results.
    pub async fn delete_analysis(&self, id: Uuid) -> Result<()> {
        self.transport().delete(&format!("/analyses/{id}")).await
    }
}
