use std::fmt;

use parking_lot::Mutex;
use specs::OptimizerSpec;

use super::{Adam, GradientDescent, GradientDescentWithMomentum, Optimizer};

/// The parameter subsets of the global model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    Actor,
    Critic,
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor => f.write_str("actor"),
            Self::Critic => f.write_str("critic"),
        }
    }
}

type BoxedOptimizer = Box<dyn Optimizer + Send>;

/// The optimizer state bound to one parameter subset of the global model.
///
/// It mirrors the shard layout of its subset, one independently locked optimizer
/// per shard, so concurrent learners serialize per shard and not per subset.
pub struct OptimizerState {
    subset: Subset,
    shards: Box<[Mutex<BoxedOptimizer>]>,
}

impl OptimizerState {
    /// Creates a new `OptimizerState`.
    ///
    /// # Arguments
    /// * `subset` - The parameter subset this state is bound to.
    /// * `shard_lens` - The length of every shard of that subset.
    /// * `optimizer_factory` - Builds the optimizer of a shard given its length.
    ///
    /// # Returns
    /// A new `OptimizerState` instance.
    pub fn new<O, OF>(subset: Subset, shard_lens: &[usize], mut optimizer_factory: OF) -> Self
    where
        O: Optimizer + Send + 'static,
        OF: FnMut(usize) -> O,
    {
        let shards = shard_lens
            .iter()
            .map(|&len| Mutex::new(Box::new(optimizer_factory(len)) as BoxedOptimizer))
            .collect();

        Self { subset, shards }
    }

    /// Resolves the `Optimizer` of every shard following a spec.
    ///
    /// # Arguments
    /// * `subset` - The parameter subset this state is bound to.
    /// * `spec` - The optimizer specification.
    /// * `shard_lens` - The length of every shard of that subset.
    pub fn from_spec(subset: Subset, spec: OptimizerSpec, shard_lens: &[usize]) -> Self {
        match spec {
            OptimizerSpec::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
            } => Self::new(subset, shard_lens, |len| {
                Adam::new(len, learning_rate, beta1, beta2, epsilon)
            }),
            OptimizerSpec::GradientDescent { learning_rate } => {
                Self::new(subset, shard_lens, |_| GradientDescent::new(learning_rate))
            }
            OptimizerSpec::GradientDescentWithMomentum {
                learning_rate,
                momentum,
            } => Self::new(subset, shard_lens, |len| {
                GradientDescentWithMomentum::new(len, learning_rate, momentum)
            }),
        }
    }

    pub fn subset(&self) -> Subset {
        self.subset
    }

    /// Returns the amount of shards this state covers.
    pub fn shards(&self) -> usize {
        self.shards.len()
    }

    /// Runs `f` with exclusive access to the optimizer of shard `idx`.
    ///
    /// # Panics
    /// If `idx` is out of bounds, callers check the layout first.
    pub(crate) fn with_shard<T, F>(&self, idx: usize, f: F) -> T
    where
        F: FnOnce(&mut (dyn Optimizer + Send)) -> T,
    {
        let mut optimizer = self.shards[idx].lock();
        f(optimizer.as_mut())
    }
}

impl fmt::Debug for OptimizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizerState")
            .field("subset", &self.subset)
            .field("shards", &self.shards.len())
            .finish()
    }
}
