use crate::{
    Shape,
    storage::{Result, SizeMismatchErr},
};

/// One experience tuple appended by an actor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    pub state: Vec<f32>,
    pub action: Vec<f32>,
    /// One reward per task.
    pub reward: Vec<f32>,
    pub next_state: Vec<f32>,
    /// One terminal flag per task.
    pub terminal: Vec<bool>,
}

/// The shape of every record a replay buffer holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionShape {
    pub state: Shape,
    pub action: Shape,
    pub reward: usize,
    pub terminal: usize,
}

impl TransitionShape {
    /// Creates a record shape for `num_tasks` rewards and terminal flags.
    pub fn new(state: Shape, action: Shape, num_tasks: usize) -> Self {
        Self {
            state,
            action,
            reward: num_tasks,
            terminal: num_tasks,
        }
    }

    /// Allocates a record of this shape with every field zeroed.
    pub fn zeroed(&self) -> Transition {
        Transition {
            state: vec![0.; self.state.numel()],
            action: vec![0.; self.action.numel()],
            reward: vec![0.; self.reward],
            next_state: vec![0.; self.state.numel()],
            terminal: vec![false; self.terminal],
        }
    }

    /// Checks every field of `transition` against this shape.
    ///
    /// # Returns
    /// A `SizeMismatchErr` for the first field with the wrong length.
    pub fn check(&self, transition: &Transition) -> Result<()> {
        SizeMismatchErr::check(self.state.numel(), transition.state.len())?;
        SizeMismatchErr::check(self.action.numel(), transition.action.len())?;
        SizeMismatchErr::check(self.reward, transition.reward.len())?;
        SizeMismatchErr::check(self.state.numel(), transition.next_state.len())?;
        SizeMismatchErr::check(self.terminal, transition.terminal.len())
    }
}
