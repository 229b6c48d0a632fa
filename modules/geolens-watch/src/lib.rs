pub mod poller;
pub mod stage;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use poller::{
    JobPoller, PollOutcome, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY, GENERIC_FAILURE_MESSAGE,
};
pub use stage::PipelineStage;
pub use traits::{JobSource, ReportNavigator};
