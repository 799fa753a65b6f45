mod counter;
mod groups;

pub use counter::{AtomicCounter, IntCounter, MonotonicCounter, RealCounter, Resettable};
pub use groups::{CounterGroups, EpisodeReport, EpisodeStats, LearnerStats, LossReport, PeriodicGroup, Progress};
