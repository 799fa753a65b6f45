use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use shared_state::{Transition, counters::AtomicCounter};

use super::training_done;
use crate::{ActorArgs, Result, env::make_env, policy::LinearActorCritic};

/// Collects experience into the replay buffer until training is done.
///
/// The actor keeps a local copy of the actor parameters and pulls it again
/// whenever the subset's version moved, so it may act on slightly stale weights.
pub fn run(args: ActorArgs) -> Result<()> {
    let ActorArgs {
        ordinal,
        options,
        mut rng,
        progress,
        stats,
        model,
        memory,
    } = args;

    let agent = &options.agent_params;
    let num_tasks = agent.num_tasks;

    let mut env = make_env(options.env_type, &options.env_params, rng.random())?;
    let policy = LinearActorCritic::new(model.layout());
    let noise = Normal::new(0., agent.action_noise)?;

    let mut params = model.actor().snapshot();
    let mut version = model.actor().version();

    let mut state = env.reset();
    let mut episode_reward = 0.;

    while !training_done(&progress, agent.steps) {
        let current = model.actor().version();
        if current != version {
            model.actor().pull_params(&mut params)?;
            version = current;
        }

        let mut action = policy.act_one(&params, &state)?;
        for a in action.iter_mut() {
            *a = (*a + noise.sample(&mut rng)).clamp(-1., 1.);
        }

        let step = env.step(&action)?;
        let done = step.is_done();
        episode_reward += step.reward as f64;

        let transition = Transition {
            state,
            action,
            reward: vec![step.reward; num_tasks],
            next_state: step.state,
            terminal: vec![step.terminal; num_tasks],
        };
        memory.append(&transition)?;

        progress.actor_step.step();
        stats.total_steps.increment(1);

        state = if done {
            let solved = env.is_solved();
            debug!("actor {ordinal}: episode reward={episode_reward:.3} solved={solved}");

            stats.record_episode(episode_reward, solved);
            episode_reward = 0.;
            env.reset()
        } else {
            transition.next_state
        };
    }

    Ok(())
}
