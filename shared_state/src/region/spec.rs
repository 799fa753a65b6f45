use std::num::NonZeroUsize;

use specs::{MemoryKind, ModelKind, OptimizerSpec, Options, ParamGenSpec};

use crate::{Shape, memory::TransitionShape, model::ModelLayout};

/// What the replay buffer is declared to hold.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySpec {
    pub kind: MemoryKind,
    pub capacity: usize,
    pub shape: TransitionShape,
}

/// What the global model is declared to be.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub kind: ModelKind,
    pub layout: ModelLayout,
    pub shard_size: NonZeroUsize,
    pub init: ParamGenSpec,
}

/// Everything the region builder needs, resolved after the shape probe ran.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    pub memory: MemorySpec,
    pub model: ModelSpec,
    pub optimizer: OptimizerSpec,
    pub seed: Option<u64>,
}

impl RegionSpec {
    /// Declares the region of a run from its options and the probed shapes.
    ///
    /// # Arguments
    /// * `options` - The run options.
    /// * `state` - The probed state shape.
    /// * `action` - The probed action shape.
    ///
    /// # Returns
    /// A spec where the buffer and the model agree on every shape.
    pub fn from_options(options: &Options, state: Shape, action: Shape) -> Self {
        let num_tasks = options.agent_params.num_tasks;

        Self {
            memory: MemorySpec {
                kind: options.memory_type,
                capacity: options.memory_params.capacity,
                shape: TransitionShape::new(state.clone(), action.clone(), num_tasks),
            },
            model: ModelSpec {
                kind: options.model_type,
                layout: ModelLayout::new(state, action, num_tasks),
                shard_size: options.model_params.shard_size,
                init: options.model_params.init,
            },
            optimizer: options.agent_params.optim,
            seed: Some(options.seed),
        }
    }
}
