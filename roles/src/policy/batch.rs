use ndarray::Array2;
use shared_state::{ModelLayout, Transition};

use super::Result;

/// A sampled minibatch, one row per transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub states: Array2<f32>,
    pub actions: Array2<f32>,
    /// `(batch, tasks)`
    pub rewards: Array2<f32>,
    pub next_states: Array2<f32>,
    /// `(batch, tasks)`, `0` where the task reached a terminal state and `1` elsewhere.
    pub not_done: Array2<f32>,
}

impl Batch {
    /// Stacks sampled transitions into matrices.
    ///
    /// # Arguments
    /// * `transitions` - The records, all with the shape `layout` describes.
    /// * `layout` - The model's layout.
    ///
    /// # Returns
    /// The batch or an error if a record doesn't have the layout's shape.
    pub fn new(transitions: &[Transition], layout: &ModelLayout) -> Result<Self> {
        let rows = transitions.len();
        let stack = |cols: usize, field: fn(&Transition) -> &[f32]| {
            let flat = transitions.iter().flat_map(|t| field(t).iter().copied()).collect();
            Array2::from_shape_vec((rows, cols), flat)
        };

        let not_done = transitions
            .iter()
            .flat_map(|t| t.terminal.iter().map(|&done| if done { 0. } else { 1. }))
            .collect();

        Ok(Self {
            states: stack(layout.state_dim(), |t| t.state.as_slice())?,
            actions: stack(layout.action_dim(), |t| t.action.as_slice())?,
            rewards: stack(layout.num_tasks, |t| t.reward.as_slice())?,
            next_states: stack(layout.state_dim(), |t| t.next_state.as_slice())?,
            not_done: Array2::from_shape_vec((rows, layout.num_tasks), not_done)?,
        })
    }

    pub fn len(&self) -> usize {
        self.states.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
