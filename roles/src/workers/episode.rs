use crate::{Result, env::Environment, policy::LinearActorCritic};

/// How a single greedy episode went.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub steps: u64,
    pub reward: f64,
    pub solved: bool,
}

/// Plays a whole episode without exploration noise.
///
/// # Arguments
/// * `env` - The environment, it's reset before the episode starts.
/// * `policy` - The model evaluated.
/// * `actor` - A snapshot of the actor parameters.
///
/// # Returns
/// The episode's outcome or an error if the model doesn't fit the environment.
pub fn run_greedy_episode(
    env: &mut dyn Environment,
    policy: &LinearActorCritic,
    actor: &[f32],
) -> Result<EpisodeOutcome> {
    let mut state = env.reset();
    let mut outcome = EpisodeOutcome {
        steps: 0,
        reward: 0.,
        solved: false,
    };

    loop {
        let action = policy.act_one(actor, &state)?;
        let step = env.step(&action)?;

        outcome.steps += 1;
        outcome.reward += step.reward as f64;

        if step.is_done() {
            outcome.solved = env.is_solved();
            return Ok(outcome);
        }

        state = step.state;
    }
}

#[cfg(test)]
mod tests {
    use shared_state::{ModelLayout, Shape};

    use super::*;
    use crate::env::CartPole;

    #[test]
    fn episodes_end_at_the_length_limit_at_the_latest() {
        let mut env = CartPole::new(25, 0);
        let layout = ModelLayout::new(Shape::from([4]), Shape::from([2]), 1);
        let policy = LinearActorCritic::new(&layout);
        let actor = vec![0.; layout.actor_len()];

        let outcome = run_greedy_episode(&mut env, &policy, &actor).unwrap();
        assert!(outcome.steps <= 25);
        assert_eq!(outcome.reward, outcome.steps as f64);
    }
}
