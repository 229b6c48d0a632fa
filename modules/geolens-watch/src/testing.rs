// Test mocks for the poll loop.
//
// Two mocks matching the two trait boundaries:
// - MockJobSource (JobSource) — scripted FIFO snapshot sequence
// - RecordingNavigator (ReportNavigator) — records every open_report call
//
// Plus GatedJobSource for cancellation-mid-fetch tests, and snapshot
// construction helpers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};
use uuid::Uuid;

use geolens_common::error::{GeoLensError, Result};
use geolens_common::{JobSnapshot, JobStatus};

use crate::traits::{JobSource, ReportNavigator};

// ---------------------------------------------------------------------------
// Snapshot helpers
// ---------------------------------------------------------------------------

pub fn snapshot(status: JobStatus, progress: u8) -> JobSnapshot {
    JobSnapshot {
        id: Uuid::new_v4(),
        lead_id: None,
        url: Some("https://example.com".to_string()),
        status,
        progress,
        error: None,
        report_id: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn pending() -> JobSnapshot {
    snapshot(JobStatus::Pending, 0)
}

pub fn active(progress: u8) -> JobSnapshot {
    snapshot(JobStatus::Processing, progress)
}

/// Active snapshot carrying a raw wire status, for exercising the legacy
/// vocabulary end to end.
pub fn active_with_wire_status(raw: &str, progress: u8) -> JobSnapshot {
    snapshot(JobStatus::from_wire(raw), progress)
}

pub fn completed(report_id: Uuid) -> JobSnapshot {
    let mut snap = snapshot(JobStatus::Completed, 100);
    snap.report_id = Some(report_id);
    snap
}

pub fn completed_without_report() -> JobSnapshot {
    snapshot(JobStatus::Completed, 100)
}

pub fn failed(message: Option<&str>) -> JobSnapshot {
    let mut snap = snapshot(JobStatus::Failed, 0);
    snap.error = message.map(String::from);
    snap
}

// ---------------------------------------------------------------------------
// MockJobSource
// ---------------------------------------------------------------------------

/// Scripted job source. Each fetch pops the next snapshot (or error);
/// running past the script surfaces as a network error.
#[derive(Default)]
pub struct MockJobSource {
    script: Mutex<VecDeque<Result<JobSnapshot>>>,
    fetches: Mutex<usize>,
}

impl MockJobSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, snap: JobSnapshot) -> Self {
        self.script.lock().unwrap().push_back(Ok(snap));
        self
    }

    pub fn then_error(self, error: GeoLensError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// How many fetches the poller performed.
    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl JobSource for MockJobSource {
    async fn job(&self, _id: Uuid) -> Result<JobSnapshot> {
        *self.fetches.lock().unwrap() += 1;
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GeoLensError::Network(
                "MockJobSource: script exhausted".to_string(),
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// GatedJobSource
// ---------------------------------------------------------------------------

/// Job source whose fetch blocks until released, so a test can cancel the
/// poller while a fetch is in flight and then let the "stale" response
/// arrive.
pub struct GatedJobSource {
    snapshot: JobSnapshot,
    entered: mpsc::UnboundedSender<()>,
    release: Arc<Notify>,
}

impl GatedJobSource {
    /// Returns the source, a receiver that yields once per fetch entered,
    /// and the handle that releases blocked fetches.
    pub fn new(snapshot: JobSnapshot) -> (Self, mpsc::UnboundedReceiver<()>, Arc<Notify>) {
        let (entered, entered_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Notify::new());
        (
            Self {
                snapshot,
                entered,
                release: release.clone(),
            },
            entered_rx,
            release,
        )
    }
}

#[async_trait]
impl JobSource for GatedJobSource {
    async fn job(&self, _id: Uuid) -> Result<JobSnapshot> {
        let _ = self.entered.send(());
        self.release.notified().await;
        Ok(self.snapshot.clone())
    }
}

// ---------------------------------------------------------------------------
// RecordingNavigator
// ---------------------------------------------------------------------------

/// Records every navigation. Tests assert on exactly-once (or never).
#[derive(Default)]
pub struct RecordingNavigator {
    opened: Mutex<Vec<Uuid>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<Uuid> {
        self.opened.lock().unwrap().clone()
    }

    pub fn open_count(&self) -> usize {
        self.opened.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportNavigator for RecordingNavigator {
    async fn open_report(&self, report_id: Uuid) {
        self.opened.lock().unwrap().push(report_id);
    }
}
