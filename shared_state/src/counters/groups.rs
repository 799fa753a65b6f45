use std::{fmt, sync::Arc};

use super::{AtomicCounter, IntCounter, MonotonicCounter, RealCounter, Resettable};

/// A group of counters the logger drains every period.
pub trait PeriodicGroup {
    type Report: fmt::Display;

    fn name(&self) -> &'static str;

    /// Resets every counter of the group and returns what they held.
    ///
    /// Each counter is swapped on its own, the report isn't a consistent cut
    /// across the whole group.
    fn drain(&self) -> Self::Report;
}

/// Global progress, never reset.
#[derive(Debug)]
pub struct Progress {
    pub actor_step: MonotonicCounter,
    pub learner_step: MonotonicCounter,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            actor_step: MonotonicCounter::new("actor_step"),
            learner_step: MonotonicCounter::new("learner_step"),
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Episode statistics, used by both actors and the evaluator.
#[derive(Debug)]
pub struct EpisodeStats {
    name: &'static str,
    pub total_steps: IntCounter,
    pub total_reward: RealCounter,
    pub n_episodes: IntCounter,
    pub n_episodes_solved: IntCounter,
}

impl EpisodeStats {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            total_steps: IntCounter::new("total_steps"),
            total_reward: RealCounter::new("total_reward"),
            n_episodes: IntCounter::new("n_episodes"),
            n_episodes_solved: IntCounter::new("n_episodes_solved"),
        }
    }

    /// Accounts a finished episode.
    ///
    /// # Arguments
    /// * `reward` - The episode's total reward.
    /// * `solved` - Whether the environment considers the episode solved.
    pub fn record_episode(&self, reward: f64, solved: bool) {
        self.total_reward.increment(reward);
        self.n_episodes.increment(1);
        if solved {
            self.n_episodes_solved.increment(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpisodeReport {
    pub total_steps: u64,
    pub total_reward: f64,
    pub n_episodes: u64,
    pub n_episodes_solved: u64,
}

impl EpisodeReport {
    /// Returns the average reward per finished episode, if any finished.
    pub fn avg_reward(&self) -> Option<f64> {
        (self.n_episodes > 0).then(|| self.total_reward / self.n_episodes as f64)
    }

    pub fn avg_steps(&self) -> Option<f64> {
        (self.n_episodes > 0).then(|| self.total_steps as f64 / self.n_episodes as f64)
    }
}

impl fmt::Display for EpisodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps={} episodes={} solved={}",
            self.total_steps, self.n_episodes, self.n_episodes_solved
        )?;

        match (self.avg_reward(), self.avg_steps()) {
            (Some(reward), Some(steps)) => {
                write!(f, " avg_reward={reward:.3} avg_steps={steps:.1}")
            }
            _ => f.write_str(" avg_reward=n/a"),
        }
    }
}

impl PeriodicGroup for EpisodeStats {
    type Report = EpisodeReport;

    fn name(&self) -> &'static str {
        self.name
    }

    fn drain(&self) -> EpisodeReport {
        EpisodeReport {
            total_steps: self.total_steps.read_and_reset(),
            total_reward: self.total_reward.read_and_reset(),
            n_episodes: self.n_episodes.read_and_reset(),
            n_episodes_solved: self.n_episodes_solved.read_and_reset(),
        }
    }
}

/// Losses accumulated by every learner, one increment per learner step.
#[derive(Debug)]
pub struct LearnerStats {
    pub actor_loss: RealCounter,
    pub critic_loss: RealCounter,
}

impl LearnerStats {
    pub fn new() -> Self {
        Self {
            actor_loss: RealCounter::new("actor_loss"),
            critic_loss: RealCounter::new("critic_loss"),
        }
    }
}

impl Default for LearnerStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LossReport {
    pub actor_loss: f64,
    pub critic_loss: f64,
}

impl LossReport {
    /// Averages the summed losses over `steps` learner steps.
    pub fn per_step(&self, steps: u64) -> Option<LossReport> {
        (steps > 0).then(|| LossReport {
            actor_loss: self.actor_loss / steps as f64,
            critic_loss: self.critic_loss / steps as f64,
        })
    }
}

impl fmt::Display for LossReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "actor_loss={:.5} critic_loss={:.5}",
            self.actor_loss, self.critic_loss
        )
    }
}

impl PeriodicGroup for LearnerStats {
    type Report = LossReport;

    fn name(&self) -> &'static str {
        "learner_stats"
    }

    fn drain(&self) -> LossReport {
        LossReport {
            actor_loss: self.actor_loss.read_and_reset(),
            critic_loss: self.critic_loss.read_and_reset(),
        }
    }
}

/// The four counter groups of a run, created once before any role starts.
#[derive(Debug, Clone)]
pub struct CounterGroups {
    pub progress: Arc<Progress>,
    pub actor_stats: Arc<EpisodeStats>,
    pub learner_stats: Arc<LearnerStats>,
    pub evaluator_stats: Arc<EpisodeStats>,
}

impl CounterGroups {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Progress::new()),
            actor_stats: Arc::new(EpisodeStats::new("actor_stats")),
            learner_stats: Arc::new(LearnerStats::new()),
            evaluator_stats: Arc::new(EpisodeStats::new("evaluator_stats")),
        }
    }
}

impl Default for CounterGroups {
    fn default() -> Self {
        Self::new()
    }
}
