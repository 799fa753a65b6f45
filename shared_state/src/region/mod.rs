mod builder;
mod error;
mod spec;

pub use builder::SharedStateBuilder;
pub use error::{BuildErr, Result};
pub use spec::{MemorySpec, ModelSpec, RegionSpec};

use std::sync::Arc;

use crate::{
    memory::ReplayBuffer,
    model::GlobalModel,
    optimization::{OptimizerState, Subset},
};

/// The region every role shares by reference, built once per run.
///
/// Cloning it clones the `Arc`s, never the storage behind them.
#[derive(Debug, Clone)]
pub struct SharedState {
    pub model: Arc<GlobalModel>,
    pub memory: Arc<ReplayBuffer>,
    pub actor_optimizer: Arc<OptimizerState>,
    pub critic_optimizer: Arc<OptimizerState>,
}

impl SharedState {
    pub fn optimizer(&self, subset: Subset) -> &Arc<OptimizerState> {
        match subset {
            Subset::Actor => &self.actor_optimizer,
            Subset::Critic => &self.critic_optimizer,
        }
    }
}
