use std::{cell::RefCell, num::NonZeroUsize, rc::Rc, sync::Arc};

use rand::{SeedableRng, rngs::StdRng};
use specs::{DistributionSpec, MemoryKind, ModelKind, ParamGenSpec};

use super::{BuildErr, MemorySpec, ModelSpec, RegionSpec, Result, SharedState};
use crate::{
    initialization::{ConstParamGen, RandParamGen},
    memory::ReplayBuffer,
    model::GlobalModel,
    optimization::{OptimizerState, Subset},
    storage::ParamStore,
};

/// Resolves the concrete `RandParamGen` for a distribution spec and hands it to
/// `callback`, so every distribution keeps its static dispatch.
///
/// # Arguments
/// * `rng` - A shared random number generator.
/// * `dist_spec` - A specification for a distribution.
/// * `limit` - The amount of parameters to generate.
/// * `fan_in` - The number of inputs of the layer.
/// * `fan_out` - The number of outputs of the layer.
/// * `callback` - The closure to call passing in the created generator.
macro_rules! with_distribution {
    ($rng:expr, $dist_spec:expr, $limit:expr, $fan_in:expr, $fan_out:expr, $callback:expr) => {
        match $dist_spec {
            DistributionSpec::Uniform { low, high } => {
                let param_gen = RandParamGen::uniform($rng, $limit, low, high)?;
                ($callback)(param_gen)
            }
            DistributionSpec::Normal { mean, std_dev } => {
                let param_gen = RandParamGen::normal($rng, $limit, mean, std_dev)?;
                ($callback)(param_gen)
            }
            DistributionSpec::XavierUniform => {
                let param_gen = RandParamGen::xavier_uniform($rng, $limit, $fan_in, $fan_out)?;
                ($callback)(param_gen)
            }
            DistributionSpec::LecunUniform => {
                let param_gen = RandParamGen::lecun_uniform($rng, $limit, $fan_in)?;
                ($callback)(param_gen)
            }
            DistributionSpec::Kaiming => {
                let param_gen = RandParamGen::kaiming($rng, $limit, $fan_in)?;
                ($callback)(param_gen)
            }
        }
    };
}

/// Builds the `SharedState` region given a specification.
///
/// The build either completes or returns an error, anything allocated on the way
/// is dropped with it.
pub struct SharedStateBuilder;

impl SharedStateBuilder {
    /// Creates a new `SharedStateBuilder`.
    ///
    /// # Returns
    /// A new `SharedStateBuilder` instance.
    pub fn new() -> Self {
        Self
    }

    /// Builds the model, the replay buffer and both optimizer states.
    ///
    /// # Arguments
    /// * `spec` - The specification of the region.
    ///
    /// # Returns
    /// The region or a `BuildErr` if the spec is missing a shape, the buffer and
    /// the model disagree, or an init distribution is invalid.
    pub fn build(&self, spec: RegionSpec) -> Result<SharedState> {
        self.validate(&spec.memory, &spec.model)?;

        let rng = self.generate_rng(spec.seed);
        let model = self.resolve_model(&rng, &spec.model)?;
        let memory = self.resolve_memory(&spec.memory)?;

        let actor_optimizer =
            OptimizerState::from_spec(Subset::Actor, spec.optimizer, &model.actor().shard_lens());
        let critic_optimizer = OptimizerState::from_spec(
            Subset::Critic,
            spec.optimizer,
            &model.critic().shard_lens(),
        );

        log::info!(
            "shared state ready: state {}, action {}, {} actor and {} critic params, buffer capacity {}",
            model.layout().state,
            model.layout().action,
            model.actor().len(),
            model.critic().len(),
            memory.capacity()
        );

        Ok(SharedState {
            model: Arc::new(model),
            memory: Arc::new(memory),
            actor_optimizer: Arc::new(actor_optimizer),
            critic_optimizer: Arc::new(critic_optimizer),
        })
    }

    /// Checks that every shape is resolved and that the buffer and the model agree.
    fn validate(&self, memory: &MemorySpec, model: &ModelSpec) -> Result<()> {
        let layout = &model.layout;

        if !layout.state.is_resolved() {
            return Err(BuildErr::MissingShape("state"));
        }
        if !layout.action.is_resolved() {
            return Err(BuildErr::MissingShape("action"));
        }
        if layout.num_tasks == 0 {
            return Err(BuildErr::NoTasks);
        }

        if memory.shape.state != layout.state {
            return Err(BuildErr::ShapeMismatch {
                what: "state",
                memory: memory.shape.state.clone(),
                model: layout.state.clone(),
            });
        }
        if memory.shape.action != layout.action {
            return Err(BuildErr::ShapeMismatch {
                what: "action",
                memory: memory.shape.action.clone(),
                model: layout.action.clone(),
            });
        }

        for (what, width) in [
            ("reward", memory.shape.reward),
            ("terminal", memory.shape.terminal),
        ] {
            if width != layout.num_tasks {
                return Err(BuildErr::TaskMismatch {
                    what,
                    memory: width,
                    model: layout.num_tasks,
                });
            }
        }

        Ok(())
    }

    /// Generates a random number generator given (or not) a seed.
    ///
    /// # Arguments
    /// * `seed` - An optional seed for the rng.
    ///
    /// # Returns
    /// A clonable random number generator with interior mutability.
    fn generate_rng(&self, seed: Option<u64>) -> Rc<RefCell<StdRng>> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Rc::new(RefCell::new(rng))
    }

    /// Resolves the global model, the actor subset is initialised before the critic.
    fn resolve_model(&self, rng: &Rc<RefCell<StdRng>>, spec: &ModelSpec) -> Result<GlobalModel> {
        match spec.kind {
            ModelKind::Linear => {
                let layout = &spec.layout;

                let actor = self.resolve_store(
                    rng,
                    spec,
                    layout.actor_len(),
                    layout.state_dim(),
                    layout.action_dim(),
                )?;
                let critic = self.resolve_store(
                    rng,
                    spec,
                    layout.critic_len(),
                    layout.critic_inputs(),
                    layout.num_tasks,
                )?;

                Ok(GlobalModel::new(layout.clone(), actor, critic)?)
            }
        }
    }

    /// Resolves the `ParamGen` of one parameter subset and fills its store.
    ///
    /// # Arguments
    /// * `rng` - The builder's random number generator.
    /// * `spec` - The model specification.
    /// * `len` - The amount of parameters of the subset.
    /// * `fan_in` - The inputs of the subset's layer.
    /// * `fan_out` - The outputs of the subset's layer.
    fn resolve_store(
        &self,
        rng: &Rc<RefCell<StdRng>>,
        spec: &ModelSpec,
        len: usize,
        fan_in: usize,
        fan_out: usize,
    ) -> Result<ParamStore> {
        let shard_size = spec.shard_size;

        match spec.init {
            ParamGenSpec::Const { value } => {
                Ok(ParamStore::new(shard_size, ConstParamGen::new(value, len)))
            }
            ParamGenSpec::Rand { distribution } => {
                with_distribution!(rng.clone(), distribution, len, fan_in, fan_out, |param_gen| {
                    Ok(ParamStore::new(shard_size, param_gen))
                })
            }
        }
    }

    fn resolve_memory(&self, spec: &MemorySpec) -> Result<ReplayBuffer> {
        let capacity = NonZeroUsize::new(spec.capacity).ok_or(BuildErr::ZeroCapacity)?;

        match spec.kind {
            MemoryKind::Ring => Ok(ReplayBuffer::new(spec.shape.clone(), capacity)),
        }
    }
}

impl Default for SharedStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use specs::Options;

    use super::*;
    use crate::Shape;

    fn spec() -> RegionSpec {
        RegionSpec::from_options(&Options::default(), Shape::from([4]), Shape::from([2]))
    }

    #[test]
    fn optimizer_states_mirror_the_model_shards() {
        let mut spec = spec();
        spec.model.shard_size = NonZeroUsize::new(4).unwrap();

        let shared = SharedStateBuilder::new().build(spec).unwrap();

        assert_eq!(shared.actor_optimizer.subset(), Subset::Actor);
        assert_eq!(shared.critic_optimizer.subset(), Subset::Critic);
        assert_eq!(
            shared.actor_optimizer.shards(),
            shared.model.actor().shard_lens().len()
        );
        assert_eq!(
            shared.critic_optimizer.shards(),
            shared.model.critic().shard_lens().len()
        );
    }

    #[test]
    fn same_seed_same_initial_model() {
        let a = SharedStateBuilder::new().build(spec()).unwrap();
        let b = SharedStateBuilder::new().build(spec()).unwrap();

        assert_eq!(a.model.actor().snapshot(), b.model.actor().snapshot());
        assert_eq!(a.model.critic().snapshot(), b.model.critic().snapshot());
    }

    #[test]
    fn const_init_fills_both_subsets() {
        let mut spec = spec();
        spec.model.init = ParamGenSpec::Const { value: 0.25 };

        let shared = SharedStateBuilder::new().build(spec).unwrap();
        assert!(shared.model.actor().snapshot().iter().all(|&p| p == 0.25));
        assert!(shared.model.critic().snapshot().iter().all(|&p| p == 0.25));
    }

    #[test]
    fn invalid_distribution_is_an_error() {
        let mut spec = spec();
        spec.model.init = ParamGenSpec::Rand {
            distribution: DistributionSpec::Uniform { low: 1., high: 0. },
        };

        let err = SharedStateBuilder::new().build(spec).unwrap_err();
        assert!(matches!(err, BuildErr::Rand(_)));
    }

    #[test]
    fn zero_capacity_is_an_error() {
        let mut spec = spec();
        spec.memory.capacity = 0;

        let err = SharedStateBuilder::new().build(spec).unwrap_err();
        assert!(matches!(err, BuildErr::ZeroCapacity));
    }
}
