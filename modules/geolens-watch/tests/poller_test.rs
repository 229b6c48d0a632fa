//! Poll loop behavior under every terminal state, plus cancellation.
//!
//! Each test follows MOCK → FUNCTION → OUTPUT: script the job source, run
//! the real poller, assert on the outcome and the navigator's record. Poll
//! and settle timings are shrunk to a millisecond so loops finish fast;
//! cancellation tests stretch them instead to hold the loop open.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use geolens_common::error::GeoLensError;
use geolens_watch::testing::*;
use geolens_watch::{JobPoller, PollOutcome, GENERIC_FAILURE_MESSAGE};

const FAST: Duration = Duration::from_millis(1);

fn fast_poller(source: Arc<MockJobSource>, navigator: Arc<RecordingNavigator>) -> JobPoller {
    JobPoller::new(source, navigator).with_timing(FAST, FAST)
}

#[tokio::test]
async fn active_job_polls_until_completed_then_navigates_once() {
    let report_id = Uuid::new_v4();
    let source = Arc::new(
        MockJobSource::new()
            .then(pending())
            .then(active(50))
            .then(completed(report_id)),
    );
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = fast_poller(source.clone(), navigator.clone());

    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    match outcome {
        PollOutcome::ReportReady { report_id: opened } => assert_eq!(opened, report_id),
        other => panic!("expected ReportReady, got {other:?}"),
    }
    // One fetch per scheduled tick, then the loop stopped.
    assert_eq!(source.fetch_count(), 3);
    assert_eq!(navigator.opened(), vec![report_id]);
}

#[tokio::test]
async fn legacy_wire_statuses_keep_the_loop_alive() {
    let report_id = Uuid::new_v4();
    let source = Arc::new(
        MockJobSource::new()
            .then(active_with_wire_status("crawling", 20))
            .then(active_with_wire_status("analyzing", 75))
            .then(active_with_wire_status("optimizing", 95)) // unknown → active
            .then(completed(report_id)),
    );
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = fast_poller(source.clone(), navigator.clone());

    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    assert!(matches!(outcome, PollOutcome::ReportReady { .. }));
    assert_eq!(source.fetch_count(), 4);
}

#[tokio::test]
async fn failed_job_stops_without_navigation() {
    let source = Arc::new(
        MockJobSource::new()
            .then(active(10))
            .then(failed(Some("crawler was blocked by robots.txt"))),
    );
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = fast_poller(source.clone(), navigator.clone());

    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    match outcome {
        PollOutcome::Failed { message } => {
            assert_eq!(message, "crawler was blocked by robots.txt")
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(navigator.open_count(), 0);
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn failed_job_without_message_uses_generic_fallback() {
    let source = Arc::new(MockJobSource::new().then(failed(None)));
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = fast_poller(source, navigator.clone());

    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    match outcome {
        PollOutcome::Failed { message } => assert_eq!(message, GENERIC_FAILURE_MESSAGE),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(navigator.open_count(), 0);
}

#[tokio::test]
async fn completed_without_report_reference_stops_without_navigation() {
    let source = Arc::new(MockJobSource::new().then(completed_without_report()));
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = fast_poller(source.clone(), navigator.clone());

    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    assert!(matches!(outcome, PollOutcome::CompletedWithoutReport));
    assert_eq!(navigator.open_count(), 0);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn fetch_error_stops_the_loop_without_retry() {
    let source = Arc::new(
        MockJobSource::new()
            .then(active(10))
            .then_error(GeoLensError::Network("connection reset".to_string())),
    );
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = fast_poller(source.clone(), navigator.clone());

    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    assert!(matches!(outcome, PollOutcome::FetchFailed(_)));
    assert_eq!(navigator.open_count(), 0);
    // The failing fetch was the last one; nothing rescheduled after it.
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn navigation_waits_for_the_settle_delay() {
    let report_id = Uuid::new_v4();
    let settle = Duration::from_millis(50);
    let source = Arc::new(MockJobSource::new().then(completed(report_id)));
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = JobPoller::new(source, navigator.clone()).with_timing(FAST, settle);

    let started = tokio::time::Instant::now();
    let outcome = poller.run(Uuid::new_v4(), CancellationToken::new()).await;

    assert!(matches!(outcome, PollOutcome::ReportReady { .. }));
    assert!(started.elapsed() >= settle);
    assert_eq!(navigator.open_count(), 1);
}

#[tokio::test]
async fn cancelling_mid_fetch_prevents_navigation() {
    let report_id = Uuid::new_v4();
    let (source, mut entered, release) = GatedJobSource::new(completed(report_id));
    let navigator = Arc::new(RecordingNavigator::new());
    let poller = Arc::new(
        JobPoller::new(Arc::new(source), navigator.clone())
            .with_timing(FAST, Duration::from_secs(30)),
    );
    let cancel = CancellationToken::new();

    let run = {
        let poller = poller.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { poller.run(Uuid::new_v4(), cancel).await })
    };

    // Wait until the poller is inside the fetch, tear the view down, then
    // let the stale response arrive.
    entered.recv().await.expect("poller never started a fetch");
    cancel.cancel();
    release.notify_waiters();

    let outcome = run.await.expect("poller task panicked");
    assert!(matches!(outcome, PollOutcome::Cancelled));
    assert_eq!(navigator.open_count(), 0);
}

#[tokio::test]
async fn cancelling_during_the_settle_delay_prevents_navigation() {
    let report_id = Uuid::new_v4();
    let source = Arc::new(MockJobSource::new().then(completed(report_id)));
    let navigator = Arc::new(RecordingNavigator::new());
    // Settle long enough that the test can always cancel inside it.
    let poller = Arc::new(
        JobPoller::new(source, navigator.clone()).with_timing(FAST, Duration::from_secs(30)),
    );
    let mut snapshots = poller.subscribe();
    let cancel = CancellationToken::new();

    let run = {
        let poller = poller.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { poller.run(Uuid::new_v4(), cancel).await })
    };

    // The completed snapshot has been observed once it is published; the
    // poller is now sitting in the settle delay.
    snapshots.changed().await.expect("poller dropped its state");
    assert!(snapshots.borrow().as_ref().is_some());
    cancel.cancel();

    let outcome = run.await.expect("poller task panicked");
    assert!(matches!(outcome, PollOutcome::Cancelled));
    assert_eq!(navigator.open_count(), 0);
}
