use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use roles::{ActorArgs, EvaluatorArgs, LearnerArgs, LoggerArgs, Role, TesterArgs};
use shared_state::{CounterGroups, SharedState};
use specs::{Mode, Options};

use crate::Result;

/// Builds the ordered role set of a run.
///
/// | mode  | roles, in order                               | ordinals                      |
/// |-------|-----------------------------------------------|-------------------------------|
/// | train | logger, `A` actors, `L` learners, evaluator   | `0`, `1..=A`, `A+1..=A+L`, `A+L+1` |
/// | test  | tester                                        | `A+L+2`                       |
///
/// Every role gets its ordinal, the options, its own rng seeded with
/// `seed + ordinal`, and only the counters and shared state it works with.
///
/// # Arguments
/// * `options` - The run options, shared read only.
/// * `shared` - The shared state region.
/// * `counters` - The run's counter groups.
///
/// # Returns
/// The roles or `OptionsErr::InvalidMode` if the mode isn't train nor test, in
/// which case no role is built.
pub fn build(
    options: &Arc<Options>,
    shared: &SharedState,
    counters: &CounterGroups,
) -> Result<Vec<Role>> {
    let mode = options.mode()?;
    let num_actors = options.num_actors;
    let num_learners = options.num_learners;

    let rng = |ordinal: usize| StdRng::seed_from_u64(options.seed.wrapping_add(ordinal as u64));

    let roles = match mode {
        Mode::Train => {
            let mut roles = Vec::with_capacity(num_actors + num_learners + 2);

            roles.push(Role::Logger(LoggerArgs {
                ordinal: 0,
                options: Arc::clone(options),
                counters: counters.clone(),
            }));

            for ordinal in 1..=num_actors {
                roles.push(Role::Actor(ActorArgs {
                    ordinal,
                    options: Arc::clone(options),
                    rng: rng(ordinal),
                    progress: Arc::clone(&counters.progress),
                    stats: Arc::clone(&counters.actor_stats),
                    model: Arc::clone(&shared.model),
                    memory: Arc::clone(&shared.memory),
                }));
            }

            for ordinal in num_actors + 1..=num_actors + num_learners {
                roles.push(Role::Learner(LearnerArgs {
                    ordinal,
                    options: Arc::clone(options),
                    rng: rng(ordinal),
                    progress: Arc::clone(&counters.progress),
                    stats: Arc::clone(&counters.learner_stats),
                    model: Arc::clone(&shared.model),
                    memory: Arc::clone(&shared.memory),
                    actor_optimizer: Arc::clone(&shared.actor_optimizer),
                    critic_optimizer: Arc::clone(&shared.critic_optimizer),
                }));
            }

            let ordinal = num_actors + num_learners + 1;
            roles.push(Role::Evaluator(EvaluatorArgs {
                ordinal,
                options: Arc::clone(options),
                rng: rng(ordinal),
                progress: Arc::clone(&counters.progress),
                stats: Arc::clone(&counters.evaluator_stats),
                model: Arc::clone(&shared.model),
            }));

            roles
        }
        Mode::Test => {
            let ordinal = num_actors + num_learners + 2;
            vec![Role::Tester(TesterArgs {
                ordinal,
                options: Arc::clone(options),
                rng: rng(ordinal),
                model: Arc::clone(&shared.model),
            })]
        }
    };

    Ok(roles)
}
