use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Job lifecycle ---

/// Canonical analysis job status. The backend has grown two status
/// vocabularies (`pending|processing` and `crawling|analyzing`); everything
/// non-terminal collapses to `Processing` here so the poller has a single
/// three-way decision to make. See `from_wire` for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Map a wire status string onto the canonical enumeration.
    ///
    /// Unrecognized values are treated as `Processing`: a status this client
    /// has never heard of cannot be terminal, and treating it as active keeps
    /// the poll loop alive instead of wedging on a newer server.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "pending" => JobStatus::Pending,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Processing,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(JobStatus::from_wire(&raw))
    }
}

impl Serialize for JobStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Read-only snapshot of an analysis job, refreshed on every poll tick.
/// Mutated only server-side.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobSnapshot {
    pub id: Uuid,
    #[serde(rename = "leadId")]
    pub lead_id: Option<Uuid>,
    pub url: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u8,
    pub error: Option<String>,
    #[serde(rename = "reportId")]
    pub report_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

// --- Leads ---

/// Lead form submission. Posting one creates the lead and kicks off an
/// analysis job server-side.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSubmission {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub url: String,
    pub consent: bool,
}

/// A captured lead as the server stores it.
#[derive(Debug, Clone, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
    pub url: String,
    #[serde(default)]
    pub consent: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Lead list entry: the lead plus its most recent job and any finished
/// reports, as returned by `GET /leads`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadOverview {
    #[serde(flatten)]
    pub lead: Lead,
    #[serde(rename = "latestJob")]
    pub latest_job: Option<JobSnapshot>,
    #[serde(default)]
    pub reports: Vec<Report>,
}

// --- Reports ---

/// Per-criterion GEO scores. Each is a float conventionally in [0, 10];
/// the rubric behind them is server business and passes through unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoreCard {
    #[serde(default)]
    pub structure: f64,
    #[serde(rename = "infoDensity", default)]
    pub info_density: f64,
    #[serde(default)]
    pub readability: f64,
    #[serde(default)]
    pub eeat: f64,
    #[serde(default)]
    pub educational: f64,
    #[serde(default)]
    pub thematic: f64,
    #[serde(rename = "aiOptimization", default)]
    pub ai_optimization: f64,
    #[serde(default)]
    pub visibility: f64,
    #[serde(default)]
    pub global_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub criterion: String,
    pub impact: String,
    pub effort: String,
    #[serde(default)]
    pub priority: i32,
    pub description: String,
    pub example: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickWin {
    pub title: String,
    pub impact: String,
    pub time_required: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutiveSummary {
    pub global_assessment: String,
    #[serde(default)]
    pub critical_issues: Vec<String>,
    #[serde(default)]
    pub key_opportunities: Vec<String>,
    pub estimated_visibility_loss: Option<String>,
    pub recommended_investment: Option<String>,
}

/// A finished analysis report. Immutable once fetched. Every section beyond
/// the scores is optional: older reports and cheaper plans omit whole
/// sections, so each one deserializes independently and renders defensively.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub id: Uuid,
    #[serde(rename = "leadId")]
    pub lead_id: Option<Uuid>,
    pub url: String,
    #[serde(rename = "type", default)]
    pub report_type: Option<String>,
    pub scores: ScoreCard,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub quick_wins: Vec<QuickWin>,
    pub analysis: Option<serde_json::Value>,
    pub detailed_observations: Option<serde_json::Value>,
    pub executive_summary: Option<ExecutiveSummary>,
    pub roi_estimation: Option<serde_json::Value>,
    pub competitive_intelligence: Option<serde_json::Value>,
    pub schemas: Option<serde_json::Value>,
    #[serde(rename = "pdfUrl")]
    pub pdf_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

// --- Newer analyses API surface ---

/// Poll payload from `GET /analyses/{id}/status` (snake_case generation).
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisStatus {
    pub id: Uuid,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u8,
    pub error_message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Full analysis record from the newer API generation. Score fields are
/// integers on this surface and only present once the run completes.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u8,
    pub error_message: Option<String>,
    pub website_id: Option<String>,
    pub user_id: Option<String>,
    pub plan_type: Option<String>,
    pub global_score: Option<i32>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisList {
    #[serde(default)]
    pub analyses: Vec<AnalysisRecord>,
    #[serde(default)]
    pub total: u64,
}

// --- Session tokens ---

/// Access + refresh token pair as issued by login/register/refresh.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// --- Users & admin ---

#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionUpdate {
    pub plan_type: String,
}

/// Aggregate counters from `GET /admin/stats`. The server may grow fields
/// here; anything this client does not model is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_analyses: u64,
    #[serde(default)]
    pub analyses_today: u64,
}
