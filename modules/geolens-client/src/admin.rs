use uuid::Uuid;

use geolens_common::error::Result;
use geolens_common::{AdminStats, AnalysisRecord, SubscriptionUpdate, UserAccount};

use crate::GeoLensClient;

impl GeoLensClient {
    pub async fn admin_users(&self) -> Result<Vec<UserAccount>> {
        self.transport().get("/admin/users").await
    }

    pub async fn admin_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        self.transport().get("/admin/analyses").await
    }

    pub async fn admin_stats(&self) -> Result<AdminStats> {
        self.transport().get("/admin/stats").await
    }

    /// Change a user's subscription plan.
    pub async fn update_subscription(&self, user_id: Uuid, plan_type: &str) -> Result<()> {
        let update = SubscriptionUpdate {
            plan_type: plan_type.to_string(),
        };
        let _: serde_json::Value = self
            .transport()
            .put(&format!("/admin/users/{user_id}/subscription"), &update)
            .await?;
        Ok(())
    }
}
