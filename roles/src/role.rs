use std::{fmt, sync::Arc};

use log::{info, warn};
use rand::rngs::StdRng;
use shared_state::{
    CounterGroups, GlobalModel, OptimizerState, ReplayBuffer,
    counters::{EpisodeStats, LearnerStats, Progress},
};
use specs::Options;

use crate::{Result, workers};

/// Everything the logger may touch: every counter group and nothing else.
#[derive(Debug)]
pub struct LoggerArgs {
    pub ordinal: usize,
    pub options: Arc<Options>,
    pub counters: CounterGroups,
}

#[derive(Debug)]
pub struct ActorArgs {
    pub ordinal: usize,
    pub options: Arc<Options>,
    pub rng: StdRng,
    pub progress: Arc<Progress>,
    pub stats: Arc<EpisodeStats>,
    pub model: Arc<GlobalModel>,
    pub memory: Arc<ReplayBuffer>,
}

/// The only arguments carrying optimizer states, so learners are the only
/// roles able to update the global model.
#[derive(Debug)]
pub struct LearnerArgs {
    pub ordinal: usize,
    pub options: Arc<Options>,
    pub rng: StdRng,
    pub progress: Arc<Progress>,
    pub stats: Arc<LearnerStats>,
    pub model: Arc<GlobalModel>,
    pub memory: Arc<ReplayBuffer>,
    pub actor_optimizer: Arc<OptimizerState>,
    pub critic_optimizer: Arc<OptimizerState>,
}

#[derive(Debug)]
pub struct EvaluatorArgs {
    pub ordinal: usize,
    pub options: Arc<Options>,
    pub rng: StdRng,
    pub progress: Arc<Progress>,
    pub stats: Arc<EpisodeStats>,
    pub model: Arc<GlobalModel>,
}

/// The tester reads the model and touches no counter.
#[derive(Debug)]
pub struct TesterArgs {
    pub ordinal: usize,
    pub options: Arc<Options>,
    pub rng: StdRng,
    pub model: Arc<GlobalModel>,
}

/// A role instance, ready to run on its own worker.
#[derive(Debug)]
pub enum Role {
    Logger(LoggerArgs),
    Actor(ActorArgs),
    Learner(LearnerArgs),
    Evaluator(EvaluatorArgs),
    Tester(TesterArgs),
}

/// The kind of a `Role`, without its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Logger,
    Actor,
    Learner,
    Evaluator,
    Tester,
}

impl RoleKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Logger => "logger",
            Self::Actor => "actor",
            Self::Learner => "learner",
            Self::Evaluator => "evaluator",
            Self::Tester => "tester",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Role {
    pub fn kind(&self) -> RoleKind {
        match self {
            Self::Logger(_) => RoleKind::Logger,
            Self::Actor(_) => RoleKind::Actor,
            Self::Learner(_) => RoleKind::Learner,
            Self::Evaluator(_) => RoleKind::Evaluator,
            Self::Tester(_) => RoleKind::Tester,
        }
    }

    pub fn ordinal(&self) -> usize {
        match self {
            Self::Logger(args) => args.ordinal,
            Self::Actor(args) => args.ordinal,
            Self::Learner(args) => args.ordinal,
            Self::Evaluator(args) => args.ordinal,
            Self::Tester(args) => args.ordinal,
        }
    }

    /// Runs the role's loop on the calling thread until its stop condition holds.
    ///
    /// # Returns
    /// A `RoleErr` if the loop had to stop early.
    pub fn run(self) -> Result<()> {
        let ordinal = self.ordinal();
        let role = self.kind().name();
        info!(ordinal = ordinal, role = role; "starting");

        let ret = match self {
            Self::Logger(args) => workers::logger::run(args),
            Self::Actor(args) => workers::actor::run(args),
            Self::Learner(args) => workers::learner::run(args),
            Self::Evaluator(args) => workers::evaluator::run(args),
            Self::Tester(args) => workers::tester::run(args).map(|_| ()),
        };

        match &ret {
            Ok(()) => info!(ordinal = ordinal, role = role; "finished"),
            Err(e) => warn!(ordinal = ordinal, role = role; "stopped early: {e}"),
        }

        ret
    }
}
