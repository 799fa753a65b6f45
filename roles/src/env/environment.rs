use shared_state::Shape;

use super::Result;

/// The outcome of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: Vec<f32>,
    pub reward: f32,
    /// The episode reached a terminal state, there is nothing to bootstrap from.
    pub terminal: bool,
    /// The episode hit its length limit without reaching a terminal state.
    pub truncated: bool,
}

impl Step {
    pub fn is_done(&self) -> bool {
        self.terminal || self.truncated
    }
}

/// An episodic control task roles interact with.
pub trait Environment: Send {
    fn state_shape(&self) -> Shape;

    fn action_shape(&self) -> Shape;

    /// Starts a new episode.
    ///
    /// # Returns
    /// The first state of the episode.
    fn reset(&mut self) -> Vec<f32>;

    /// Advances the current episode by one step.
    ///
    /// # Arguments
    /// * `action` - A flat action with the environment's action shape, every value in `[-1, 1]`.
    ///
    /// # Returns
    /// The resulting step or an `EnvErr` if the action has the wrong shape.
    fn step(&mut self, action: &[f32]) -> Result<Step>;

    /// Whether the last finished episode counts as solved.
    fn is_solved(&self) -> bool;
}
