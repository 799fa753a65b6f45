use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    EnvKind, MemoryKind, ModelKind, OptimizerSpec, ParamGenSpec,
    error::{OptionsErr, Result},
};

/// What a run does with its roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Logger, actors, learners and an evaluator.
    Train,
    /// A single tester.
    Test,
}

impl TryFrom<u8> for Mode {
    type Error = OptionsErr;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Train),
            2 => Ok(Self::Test),
            other => Err(OptionsErr::InvalidMode(other)),
        }
    }
}

/// Parameters handed to every environment instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvParams {
    pub max_episode_length: usize,
}

impl Default for EnvParams {
    fn default() -> Self {
        Self {
            max_episode_length: 200,
        }
    }
}

/// Parameters of the global replay buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryParams {
    pub capacity: usize,
}

impl Default for MemoryParams {
    fn default() -> Self {
        Self { capacity: 100_000 }
    }
}

/// Parameters of the global model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParams {
    /// The maximum amount of parameters per shard.
    pub shard_size: NonZeroUsize,
    pub init: ParamGenSpec,
    /// Where the evaluator checkpoints the best model and the tester loads it from.
    pub model_file: Option<PathBuf>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            shard_size: NonZeroUsize::new(256).unwrap_or(NonZeroUsize::MIN),
            init: ParamGenSpec::default(),
            model_file: None,
        }
    }
}

/// Parameters of the learning agent and of the role loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentParams {
    /// Width of the reward and terminal vectors.
    pub num_tasks: usize,
    /// Learner steps after which every training role stops.
    pub steps: u64,
    pub gamma: f32,
    /// Soft update rate of the learner's target copy.
    pub tau: f32,
    pub batch_size: usize,
    /// Records the buffer must hold before learners start.
    pub learn_start: usize,
    /// Standard deviation of the actors' exploration noise.
    pub action_noise: f32,
    pub optim: OptimizerSpec,
    pub logger_freq_ms: u64,
    /// Learner steps between two evaluations.
    pub evaluator_freq: u64,
    pub evaluator_nepisodes: usize,
    pub tester_nepisodes: usize,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            num_tasks: 1,
            steps: 20_000,
            gamma: 0.99,
            tau: 0.005,
            batch_size: 64,
            learn_start: 1_000,
            action_noise: 0.1,
            optim: OptimizerSpec::default(),
            logger_freq_ms: 2_000,
            evaluator_freq: 1_000,
            evaluator_nepisodes: 5,
            tester_nepisodes: 10,
        }
    }
}

impl AgentParams {
    /// Returns the period between two logger reports.
    pub fn logger_freq(&self) -> Duration {
        Duration::from_millis(self.logger_freq_ms)
    }
}

/// The configuration snapshot of a run, shared read only by every role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// `1` trains, `2` tests, anything else is rejected.
    pub mode: u8,
    pub seed: u64,
    pub env_type: EnvKind,
    pub memory_type: MemoryKind,
    pub model_type: ModelKind,
    pub num_actors: usize,
    pub num_learners: usize,
    pub env_params: EnvParams,
    pub memory_params: MemoryParams,
    pub model_params: ModelParams,
    pub agent_params: AgentParams,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: 1,
            seed: 123,
            env_type: EnvKind::default(),
            memory_type: MemoryKind::default(),
            model_type: ModelKind::default(),
            num_actors: 4,
            num_learners: 1,
            env_params: EnvParams::default(),
            memory_params: MemoryParams::default(),
            model_params: ModelParams::default(),
            agent_params: AgentParams::default(),
        }
    }
}

impl Options {
    /// Parses the options from a JSON document, missing fields take their default.
    ///
    /// # Arguments
    /// * `json` - The JSON text.
    ///
    /// # Returns
    /// The parsed options or an error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON options file.
    ///
    /// # Arguments
    /// * `path` - The path of the file.
    ///
    /// # Returns
    /// The parsed options or an error if the file can't be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validates the raw `mode` field.
    ///
    /// # Returns
    /// The run mode or `OptionsErr::InvalidMode`.
    pub fn mode(&self) -> Result<Mode> {
        Mode::try_from(self.mode)
    }
}
