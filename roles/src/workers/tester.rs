use log::info;
use rand::Rng;
use shared_state::counters::EpisodeReport;

use super::episode::run_greedy_episode;
use crate::{Result, TesterArgs, env::make_env, policy::LinearActorCritic};

/// Plays `tester_nepisodes` greedy episodes once against the model as it is now.
///
/// # Returns
/// The totals of every episode played.
pub fn run(args: TesterArgs) -> Result<EpisodeReport> {
    let TesterArgs {
        ordinal,
        options,
        mut rng,
        model,
    } = args;

    let mut env = make_env(options.env_type, &options.env_params, rng.random())?;
    let policy = LinearActorCritic::new(model.layout());
    let actor = model.actor().snapshot();

    let mut report = EpisodeReport::default();
    for episode in 0..options.agent_params.tester_nepisodes {
        let outcome = run_greedy_episode(env.as_mut(), &policy, &actor)?;
        info!(
            "tester {ordinal}: episode {episode} reward={:.3} steps={} solved={}",
            outcome.reward, outcome.steps, outcome.solved
        );

        report.total_steps += outcome.steps;
        report.total_reward += outcome.reward;
        report.n_episodes += 1;
        report.n_episodes_solved += outcome.solved as u64;
    }

    info!("tester {ordinal}: {report}");
    Ok(report)
}
