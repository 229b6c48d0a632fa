//! The lead funnel end to end over a scripted wire: submit the form, find
//! the background job, observe completion, fetch the report, and check the
//! report describes the URL that was submitted.

use std::sync::Arc;

use serde_json::json;

use geolens_client::testing::MockSender;
use geolens_client::{GeoLensClient, MemorySession};
use geolens_common::JobStatus;

const BASE: &str = "http://localhost:8000/api";
const SITE: &str = "https://acme-widgets.example";

const LEAD_ID: &str = "0d4b17a2-0a52-4a1c-8c7e-5f9f6b3d2e21";
const JOB_ID: &str = "6e4a2c9e-58b2-4a3e-9f3e-2b7c1d0a9f11";
const REPORT_ID: &str = "8f3b5e1c-7d2a-4b9e-a1c4-3e5f7a9b1d23";

fn lead_json() -> serde_json::Value {
    json!({
        "id": LEAD_ID,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@acme-widgets.example",
        "company": "Acme Widgets",
        "url": SITE,
        "consent": true
    })
}

#[tokio::test]
async fn submitted_url_comes_back_on_the_finished_report() {
    let sender = Arc::new(
        MockSender::new()
            // POST /leads
            .respond_json(200, lead_json())
            // GET /leads, after the background task has created the job
            .respond_json(
                200,
                json!([{
                    "id": LEAD_ID,
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "email": "ada@acme-widgets.example",
                    "url": SITE,
                    "consent": true,
                    "latestJob": {
                        "id": JOB_ID,
                        "leadId": LEAD_ID,
                        "url": SITE,
                        "status": "pending",
                        "progress": 0
                    },
                    "reports": []
                }]),
            )
            // GET /jobs/{id}: terminal snapshot
            .respond_json(
                200,
                json!({
                    "id": JOB_ID,
                    "leadId": LEAD_ID,
                    "url": SITE,
                    "status": "completed",
                    "progress": 100,
                    "reportId": REPORT_ID
                }),
            )
            // GET /reports/{id}
            .respond_json(
                200,
                json!({
                    "id": REPORT_ID,
                    "leadId": LEAD_ID,
                    "url": SITE,
                    "type": "executive",
                    "scores": {
                        "structure": 7.0,
                        "infoDensity": 5.5,
                        "readability": 8.0,
                        "eeat": 6.0,
                        "educational": 4.5,
                        "thematic": 7.5,
                        "aiOptimization": 5.0,
                        "visibility": 3.5,
                        "global_score": 5.9
                    },
                    "recommendations": [],
                    "quick_wins": []
                }),
            ),
    );
    let client = GeoLensClient::with_parts(BASE, sender, Arc::new(MemorySession::new()));

    let lead = client
        .submit_lead(&geolens_common::LeadSubmission {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@acme-widgets.example".to_string(),
            company: Some("Acme Widgets".to_string()),
            url: SITE.to_string(),
            consent: true,
        })
        .await
        .expect("lead submission should succeed");
    assert_eq!(lead.url, SITE);

    let job = client
        .latest_job_for_lead(lead.id)
        .await
        .expect("lead list should load")
        .expect("background job should exist for the lead");
    assert_eq!(job.status, JobStatus::Pending);

    let snapshot = client.job(job.id).await.expect("poll fetch should succeed");
    assert_eq!(snapshot.status, JobStatus::Completed);
    let report_id = snapshot.report_id.expect("completed job carries a report");

    let report = client.report(report_id).await.expect("report should load");
    assert_eq!(report.url, SITE);
    assert_eq!(report.scores.global_score, 5.9);
    // Optional sections absent: rendered defensively, not an error.
    assert!(report.executive_summary.is_none());
    assert!(report.competitive_intelligence.is_none());
}
