//! The loops every role runs on its worker thread.

pub mod actor;
pub mod episode;
pub mod evaluator;
pub mod learner;
pub mod logger;
pub mod tester;

use std::time::Duration;

use shared_state::counters::{AtomicCounter, Progress};

/// How long a role waits before polling the shared state again.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Training stops for every role once the learners took `steps` steps.
fn training_done(progress: &Progress, steps: u64) -> bool {
    progress.learner_step.get() >= steps
}
