use crate::{
    model::ModelLayout,
    optimization::{OptimizerState, Subset},
    storage::{ParamStore, Result, SizeMismatchErr},
};

/// The model every role shares by reference.
///
/// Any role may pull parameters from it, but updates need an `OptimizerState`,
/// and only learners are handed those.
#[derive(Debug)]
pub struct GlobalModel {
    layout: ModelLayout,
    actor: ParamStore,
    critic: ParamStore,
}

impl GlobalModel {
    /// Creates a new `GlobalModel` from its two parameter subsets.
    ///
    /// # Arguments
    /// * `layout` - The layout the subsets must follow.
    /// * `actor` - The actor parameters.
    /// * `critic` - The critic parameters.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if a subset doesn't have the length `layout` expects.
    pub fn new(layout: ModelLayout, actor: ParamStore, critic: ParamStore) -> Result<Self> {
        SizeMismatchErr::check(layout.actor_len(), actor.len())?;
        SizeMismatchErr::check(layout.critic_len(), critic.len())?;

        Ok(Self {
            layout,
            actor,
            critic,
        })
    }

    pub fn layout(&self) -> &ModelLayout {
        &self.layout
    }

    pub fn actor(&self) -> &ParamStore {
        &self.actor
    }

    pub fn critic(&self) -> &ParamStore {
        &self.critic
    }

    pub fn store(&self, subset: Subset) -> &ParamStore {
        match subset {
            Subset::Actor => &self.actor,
            Subset::Critic => &self.critic,
        }
    }

    /// Applies a gradient to the subset `optimizer` is bound to.
    ///
    /// # Arguments
    /// * `optimizer` - An actor or critic optimizer state.
    /// * `grad` - The gradient of the whole subset.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `grad` doesn't match the subset's length.
    pub fn apply(&self, optimizer: &OptimizerState, grad: &[f32]) -> Result<()> {
        self.store(optimizer.subset()).apply(optimizer, grad)
    }
}
