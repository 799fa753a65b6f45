use ndarray::{Array2, ArrayView2, Axis, concatenate, s};
use shared_state::ModelLayout;

use super::{Batch, Dense, Result};

/// The linear deterministic actor-critic the global model stores.
///
/// * actor: `a = tanh(s W_a + b_a)`
/// * critic: `q = [s, a] W_c + b_c`, one value per task
///
/// It holds no parameters, every call reads them from the slices it's given, so
/// the same instance serves the global model, local copies and target copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearActorCritic {
    state_dim: usize,
    actor: Dense,
    critic: Dense,
}

impl LinearActorCritic {
    pub fn new(layout: &ModelLayout) -> Self {
        Self {
            state_dim: layout.state_dim(),
            actor: Dense::new((layout.state_dim(), layout.action_dim())),
            critic: Dense::new((layout.critic_inputs(), layout.num_tasks)),
        }
    }

    /// Computes the deterministic action of every state.
    pub fn act(&self, actor: &[f32], states: ArrayView2<f32>) -> Result<Array2<f32>> {
        Ok(self.actor.forward(actor, states)?.mapv(f32::tanh))
    }

    /// Computes the deterministic action of a single flat state.
    pub fn act_one(&self, actor: &[f32], state: &[f32]) -> Result<Vec<f32>> {
        let states = ArrayView2::from_shape((1, self.state_dim), state)?;
        Ok(self.act(actor, states)?.iter().copied().collect())
    }

    /// Computes `q(s, a)` for every row, a `(batch, tasks)` matrix.
    pub fn q_values(
        &self,
        critic: &[f32],
        states: ArrayView2<f32>,
        actions: ArrayView2<f32>,
    ) -> Result<Array2<f32>> {
        let inputs = concatenate(Axis(1), &[states, actions])?;
        self.critic.forward(critic, inputs.view())
    }

    /// Computes the bootstrapped targets `r + gamma * not_done * q'(s', pi'(s'))`.
    ///
    /// # Arguments
    /// * `target_actor` - The actor parameters of the target copy.
    /// * `target_critic` - The critic parameters of the target copy.
    /// * `batch` - The sampled minibatch.
    /// * `gamma` - The discount factor.
    pub fn td_targets(
        &self,
        target_actor: &[f32],
        target_critic: &[f32],
        batch: &Batch,
        gamma: f32,
    ) -> Result<Array2<f32>> {
        let next_actions = self.act(target_actor, batch.next_states.view())?;
        let next_q = self.q_values(target_critic, batch.next_states.view(), next_actions.view())?;

        Ok(&batch.rewards + &(next_q * &batch.not_done * gamma))
    }

    /// Regresses the critic on `targets` with a mean squared error.
    ///
    /// # Returns
    /// The loss and the gradient of the critic parameters.
    pub fn critic_grad(
        &self,
        critic: &[f32],
        batch: &Batch,
        targets: ArrayView2<f32>,
    ) -> Result<(f32, Vec<f32>)> {
        let inputs = concatenate(Axis(1), &[batch.states.view(), batch.actions.view()])?;
        let q = self.critic.forward(critic, inputs.view())?;

        let diff = q - &targets;
        let loss = diff.mapv(|x| x.powi(2)).mean().unwrap_or_default();
        let d = diff * (2. / targets.len().max(1) as f32);

        let (grad, _) = self.critic.backward(critic, inputs.view(), d.view())?;
        Ok((loss, grad))
    }

    /// Pushes the actor towards actions the critic values higher, the loss is
    /// the negated mean over the batch of the summed task values.
    ///
    /// # Returns
    /// The loss and the gradient of the actor parameters.
    pub fn actor_grad(
        &self,
        actor: &[f32],
        critic: &[f32],
        states: ArrayView2<f32>,
    ) -> Result<(f32, Vec<f32>)> {
        let rows = states.nrows().max(1) as f32;

        let actions = self.act(actor, states)?;
        let inputs = concatenate(Axis(1), &[states, actions.view()])?;
        let q = self.critic.forward(critic, inputs.view())?;
        let loss = -q.sum() / rows;

        let d_q = Array2::from_elem(q.raw_dim(), -1. / rows);
        let (_, d_inputs) = self.critic.backward(critic, inputs.view(), d_q.view())?;

        let d_actions = d_inputs.slice(s![.., self.state_dim..]);
        let d_z = &d_actions * &actions.mapv(|a| 1. - a * a);

        let (grad, _) = self.actor.backward(actor, states, d_z.view())?;
        Ok((loss, grad))
    }
}

/// Moves every `target` parameter a fraction `tau` of the way towards `online`.
pub fn soft_update(target: &mut [f32], online: &[f32], tau: f32) {
    for (t, &o) in target.iter_mut().zip(online) {
        *t += tau * (o - *t);
    }
}
