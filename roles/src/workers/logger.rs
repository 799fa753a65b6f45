use std::{fmt, thread};

use log::info;
use shared_state::counters::{AtomicCounter, EpisodeReport, LossReport, PeriodicGroup};

use super::training_done;
use crate::{LoggerArgs, Result};

/// One drain of every counter group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub actor_step: u64,
    pub learner_step: u64,
    pub actor: EpisodeReport,
    /// Losses averaged over the learner steps taken since the previous report.
    pub learner: Option<LossReport>,
    pub evaluator: EpisodeReport,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "progress: actor_step={} learner_step={}",
            self.actor_step, self.learner_step
        )?;
        writeln!(f, "actor_stats: {}", self.actor)?;
        match &self.learner {
            Some(losses) => writeln!(f, "learner_stats: {losses}")?,
            None => writeln!(f, "learner_stats: no steps")?,
        }
        write!(f, "evaluator_stats: {}", self.evaluator)
    }
}

/// Periodically drains the statistic groups and reports them.
pub struct Logger {
    args: LoggerArgs,
    last_learner_step: u64,
}

impl Logger {
    pub fn new(args: LoggerArgs) -> Self {
        Self {
            args,
            last_learner_step: 0,
        }
    }

    /// Reads the progress counters and resets every periodic group.
    pub fn report(&mut self) -> Report {
        let counters = &self.args.counters;

        let actor_step = counters.progress.actor_step.get();
        let learner_step = counters.progress.learner_step.get();
        let steps = learner_step.saturating_sub(self.last_learner_step);
        self.last_learner_step = learner_step;

        Report {
            actor_step,
            learner_step,
            actor: counters.actor_stats.drain(),
            learner: counters.learner_stats.drain().per_step(steps),
            evaluator: counters.evaluator_stats.drain(),
        }
    }

    /// Reports every `logger_freq` until the first report taken once training is done.
    pub fn run(mut self) -> Result<()> {
        let period = self.args.options.agent_params.logger_freq();
        let steps = self.args.options.agent_params.steps;

        loop {
            thread::sleep(period);

            let done = training_done(&self.args.counters.progress, steps);
            let report = self.report();
            info!("logger {}:\n{report}", self.args.ordinal);

            if done {
                return Ok(());
            }
        }
    }
}

pub fn run(args: LoggerArgs) -> Result<()> {
    Logger::new(args).run()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_state::CounterGroups;
    use specs::Options;

    use super::*;

    fn logger(counters: CounterGroups) -> Logger {
        Logger::new(LoggerArgs {
            ordinal: 0,
            options: Arc::new(Options::default()),
            counters,
        })
    }

    #[test]
    fn report_drains_statistics_but_not_progress() {
        let counters = CounterGroups::new();
        let mut logger = logger(counters.clone());

        counters.progress.actor_step.increment(10);
        counters.progress.learner_step.increment(4);
        counters.actor_stats.total_steps.increment(10);
        counters.actor_stats.record_episode(10., true);
        counters.learner_stats.critic_loss.increment(2.);
        counters.evaluator_stats.record_episode(-3., false);

        let report = logger.report();
        assert_eq!(report.actor_step, 10);
        assert_eq!(report.learner_step, 4);
        assert_eq!(report.actor.n_episodes_solved, 1);
        assert_eq!(report.learner.unwrap().critic_loss, 0.5);
        assert_eq!(report.evaluator.total_reward, -3.);

        let report = logger.report();
        assert_eq!(report.actor_step, 10);
        assert_eq!(report.actor, EpisodeReport::default());
        assert_eq!(report.learner, None);
        assert_eq!(report.evaluator, EpisodeReport::default());
    }

    #[test]
    fn stops_once_training_is_done() {
        let counters = CounterGroups::new();
        let mut options = Options::default();
        options.agent_params.steps = 3;
        options.agent_params.logger_freq_ms = 1;

        counters.progress.learner_step.increment(3);

        let logger = Logger::new(LoggerArgs {
            ordinal: 0,
            options: Arc::new(options),
            counters,
        });
        assert!(logger.run().is_ok());
    }
}
