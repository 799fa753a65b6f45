use std::{sync::Arc, thread};

use rand::{SeedableRng, rngs::StdRng};
use roles::{ActorArgs, EvaluatorArgs, LearnerArgs, Role, RoleKind, TesterArgs};
use shared_state::{
    CounterGroups, RegionSpec, SharedState, SharedStateBuilder, Shape,
    counters::{AtomicCounter, PeriodicGroup},
};
use specs::{EnvKind, Options};

fn options(env_type: EnvKind) -> Options {
    let mut options = Options {
        env_type,
        ..Options::default()
    };
    options.env_params.max_episode_length = 20;
    options.memory_params.capacity = 64;
    options.agent_params.steps = 30;
    options.agent_params.learn_start = 8;
    options.agent_params.batch_size = 4;
    options.agent_params.evaluator_freq = 10;
    options.agent_params.evaluator_nepisodes = 1;
    options.agent_params.tester_nepisodes = 2;
    options
}

fn shared(options: &Options, state: Shape, action: Shape) -> SharedState {
    SharedStateBuilder::new()
        .build(RegionSpec::from_options(options, state, action))
        .unwrap()
}

#[test]
fn actor_and_learner_train_until_the_step_budget() {
    let options = Arc::new(options(EnvKind::CartPole));
    let shared = shared(&options, Shape::from([4]), Shape::from([2]));
    let counters = CounterGroups::new();

    let actor = Role::Actor(ActorArgs {
        ordinal: 1,
        options: Arc::clone(&options),
        rng: StdRng::seed_from_u64(1),
        progress: Arc::clone(&counters.progress),
        stats: Arc::clone(&counters.actor_stats),
        model: Arc::clone(&shared.model),
        memory: Arc::clone(&shared.memory),
    });
    let learner = Role::Learner(LearnerArgs {
        ordinal: 2,
        options: Arc::clone(&options),
        rng: StdRng::seed_from_u64(2),
        progress: Arc::clone(&counters.progress),
        stats: Arc::clone(&counters.learner_stats),
        model: Arc::clone(&shared.model),
        memory: Arc::clone(&shared.memory),
        actor_optimizer: Arc::clone(&shared.actor_optimizer),
        critic_optimizer: Arc::clone(&shared.critic_optimizer),
    });
    let evaluator = Role::Evaluator(EvaluatorArgs {
        ordinal: 3,
        options: Arc::clone(&options),
        rng: StdRng::seed_from_u64(3),
        progress: Arc::clone(&counters.progress),
        stats: Arc::clone(&counters.evaluator_stats),
        model: Arc::clone(&shared.model),
    });

    assert_eq!(actor.kind(), RoleKind::Actor);
    assert_eq!(learner.ordinal(), 2);

    let initial_actor = shared.model.actor().snapshot();

    let handles: Vec<_> = [actor, learner, evaluator]
        .into_iter()
        .map(|role| thread::spawn(move || role.run()))
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let progress = &counters.progress;
    assert!(progress.learner_step.get() >= 30);
    assert!(progress.actor_step.get() >= 8);
    assert_eq!(
        counters.actor_stats.drain().total_steps,
        progress.actor_step.get()
    );

    assert_eq!(shared.model.actor().version(), progress.learner_step.get());
    assert_ne!(shared.model.actor().snapshot(), initial_actor);
    assert_eq!(shared.memory.len(), 64.min(progress.actor_step.get() as usize));
}

#[test]
fn tester_plays_its_episodes_without_counters() {
    let options = Arc::new(options(EnvKind::Pendulum));
    let shared = shared(&options, Shape::from([3]), Shape::from([1]));

    let report = roles::workers::tester::run(TesterArgs {
        ordinal: 2,
        options: Arc::clone(&options),
        rng: StdRng::seed_from_u64(0),
        model: Arc::clone(&shared.model),
    })
    .unwrap();

    assert_eq!(report.n_episodes, 2);
    assert_eq!(report.total_steps, 40);
    assert!(report.total_reward <= 0.);
    assert_eq!(shared.model.actor().version(), 0);
    assert_eq!(shared.model.critic().version(), 0);
}

#[test]
fn roles_stop_right_away_once_training_is_done() {
    let mut options = options(EnvKind::CartPole);
    options.agent_params.steps = 0;
    let options = Arc::new(options);
    let shared = shared(&options, Shape::from([4]), Shape::from([2]));
    let counters = CounterGroups::new();

    let learner = Role::Learner(LearnerArgs {
        ordinal: 1,
        options: Arc::clone(&options),
        rng: StdRng::seed_from_u64(0),
        progress: Arc::clone(&counters.progress),
        stats: Arc::clone(&counters.learner_stats),
        model: Arc::clone(&shared.model),
        memory: Arc::clone(&shared.memory),
        actor_optimizer: Arc::clone(&shared.actor_optimizer),
        critic_optimizer: Arc::clone(&shared.critic_optimizer),
    });

    learner.run().unwrap();
    assert!(shared.memory.is_empty());
    assert_eq!(counters.progress.learner_step.get(), 0);
}
