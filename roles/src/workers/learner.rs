use std::thread;

use log::debug;
use shared_state::counters::AtomicCounter;

use super::{POLL_INTERVAL, training_done};
use crate::{
    LearnerArgs, Result,
    policy::{Batch, LinearActorCritic, soft_update},
};

/// How often, in learner steps, a learner logs its losses.
const REPORT_EVERY: u64 = 500;

/// Trains the global model from replayed experience until `steps` learner steps
/// were taken across every learner.
///
/// Each step pulls the current parameters, computes both gradients on a sampled
/// batch and applies them through the shared optimizer states. The bootstrapped
/// targets come from a private copy of the model that trails the global one.
pub fn run(args: LearnerArgs) -> Result<()> {
    let LearnerArgs {
        ordinal,
        options,
        mut rng,
        progress,
        stats,
        model,
        memory,
        actor_optimizer,
        critic_optimizer,
    } = args;

    let agent = &options.agent_params;
    let layout = model.layout();
    let policy = LinearActorCritic::new(layout);

    let mut actor = model.actor().snapshot();
    let mut critic = model.critic().snapshot();
    let mut target_actor = actor.clone();
    let mut target_critic = critic.clone();

    let warmup = agent.learn_start.max(agent.batch_size);
    while memory.len() < warmup {
        if training_done(&progress, agent.steps) {
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL);
    }

    debug!("learner {ordinal}: buffer holds {} records, learning", memory.len());

    while !training_done(&progress, agent.steps) {
        let transitions = match memory.sample(agent.batch_size, &mut rng) {
            Some(transitions) if !transitions.is_empty() => transitions,
            _ => {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
        };

        model.actor().pull_params(&mut actor)?;
        model.critic().pull_params(&mut critic)?;

        let batch = Batch::new(&transitions, layout)?;
        let targets = policy.td_targets(&target_actor, &target_critic, &batch, agent.gamma)?;
        let (critic_loss, critic_grad) = policy.critic_grad(&critic, &batch, targets.view())?;
        let (actor_loss, actor_grad) = policy.actor_grad(&actor, &critic, batch.states.view())?;

        model.apply(&critic_optimizer, &critic_grad)?;
        model.apply(&actor_optimizer, &actor_grad)?;

        soft_update(&mut target_actor, &actor, agent.tau);
        soft_update(&mut target_critic, &critic, agent.tau);

        stats.actor_loss.increment(actor_loss as f64);
        stats.critic_loss.increment(critic_loss as f64);

        let step = progress.learner_step.step() + 1;
        if step % REPORT_EVERY == 0 {
            debug!(
                "learner {ordinal}: step {step} actor_loss={actor_loss:.5} critic_loss={critic_loss:.5}"
            );
        }
    }

    Ok(())
}
