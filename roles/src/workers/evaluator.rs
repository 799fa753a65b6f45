use std::thread;

use log::{info, warn};
use rand::Rng;
use shared_state::counters::AtomicCounter;

use super::{POLL_INTERVAL, episode::run_greedy_episode, training_done};
use crate::{EvaluatorArgs, Result, env::make_env, policy::LinearActorCritic};

/// Evaluates the global model every `evaluator_freq` learner steps until training
/// is done, checkpointing it whenever the average reward improves.
pub fn run(args: EvaluatorArgs) -> Result<()> {
    let EvaluatorArgs {
        ordinal,
        options,
        mut rng,
        progress,
        stats,
        model,
    } = args;

    let agent = &options.agent_params;
    let model_file = options.model_params.model_file.as_deref();

    let mut env = make_env(options.env_type, &options.env_params, rng.random())?;
    let policy = LinearActorCritic::new(model.layout());

    let freq = agent.evaluator_freq.max(1);
    let mut next_eval = 0;
    let mut best = f64::NEG_INFINITY;
    let mut evaluations = 0u64;

    loop {
        let learner_step = progress.learner_step.get();
        if learner_step >= agent.steps {
            break;
        }
        if learner_step < next_eval {
            thread::sleep(POLL_INTERVAL);
            continue;
        }
        next_eval = learner_step + freq;

        let actor = model.actor().snapshot();
        let mut total_reward = 0.;

        for _ in 0..agent.evaluator_nepisodes {
            let outcome = run_greedy_episode(env.as_mut(), &policy, &actor)?;

            stats.total_steps.increment(outcome.steps);
            stats.record_episode(outcome.reward, outcome.solved);
            total_reward += outcome.reward;
        }
        evaluations += 1;

        if agent.evaluator_nepisodes == 0 {
            continue;
        }

        let avg_reward = total_reward / agent.evaluator_nepisodes as f64;
        if avg_reward <= best {
            continue;
        }
        best = avg_reward;

        match model_file {
            Some(path) => {
                model.save(path)?;
                info!(
                    "evaluator {ordinal}: avg reward {avg_reward:.3} at learner step {learner_step}, saved {}",
                    path.display()
                );
            }
            None => info!(
                "evaluator {ordinal}: avg reward {avg_reward:.3} at learner step {learner_step}"
            ),
        }
    }

    if evaluations == 0 {
        warn!("evaluator {ordinal}: training ended before any evaluation");
    }

    Ok(())
}
