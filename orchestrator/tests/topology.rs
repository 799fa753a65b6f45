use std::sync::Arc;

use orchestrator::{OrchestratorError, topology};
use roles::{Role, RoleKind};
use shared_state::{CounterGroups, SharedState};
use specs::{Options, OptionsErr};

fn options(mode: u8, num_actors: usize, num_learners: usize) -> Arc<Options> {
    let mut options = Options {
        mode,
        num_actors,
        num_learners,
        ..Options::default()
    };
    options.memory_params.capacity = 16;
    Arc::new(options)
}

fn shared(options: &Options) -> SharedState {
    let train = Options {
        mode: 1,
        ..options.clone()
    };
    orchestrator::prepare(&train).unwrap().1
}

fn build(options: &Arc<Options>) -> Result<Vec<Role>, OrchestratorError> {
    topology::build(options, &shared(options), &CounterGroups::new())
}

fn layout(roles: &[Role]) -> Vec<(RoleKind, usize)> {
    roles.iter().map(|r| (r.kind(), r.ordinal())).collect()
}

#[test]
fn two_actors_one_learner() {
    let roles = build(&options(1, 2, 1)).unwrap();

    assert_eq!(
        layout(&roles),
        [
            (RoleKind::Logger, 0),
            (RoleKind::Actor, 1),
            (RoleKind::Actor, 2),
            (RoleKind::Learner, 3),
            (RoleKind::Evaluator, 4),
        ]
    );
}

#[test]
fn train_ordinals_are_contiguous_for_any_counts() {
    for num_actors in 0..4 {
        for num_learners in 0..4 {
            let roles = build(&options(1, num_actors, num_learners)).unwrap();
            let ordinals: Vec<_> = roles.iter().map(Role::ordinal).collect();

            assert_eq!(roles.len(), num_actors + num_learners + 2);
            assert_eq!(ordinals, (0..=num_actors + num_learners + 1).collect::<Vec<_>>());

            let kinds: Vec<_> = roles.iter().map(Role::kind).collect();
            assert_eq!(kinds.first(), Some(&RoleKind::Logger));
            assert_eq!(kinds.last(), Some(&RoleKind::Evaluator));
            assert_eq!(kinds.iter().filter(|&&k| k == RoleKind::Actor).count(), num_actors);
            assert_eq!(
                kinds.iter().filter(|&&k| k == RoleKind::Learner).count(),
                num_learners
            );
        }
    }
}

#[test]
fn test_mode_builds_a_single_tester() {
    for (num_actors, num_learners) in [(0, 0), (2, 1), (8, 3)] {
        let roles = build(&options(2, num_actors, num_learners)).unwrap();

        assert_eq!(
            layout(&roles),
            [(RoleKind::Tester, num_actors + num_learners + 2)]
        );
    }
}

#[test]
fn unsupported_modes_build_nothing() {
    for mode in [0, 3, 42] {
        let err = build(&options(mode, 2, 1)).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::Options(OptionsErr::InvalidMode(m)) if m == mode
        ));
    }
}

#[test]
fn roles_share_the_same_region() {
    let options = options(1, 1, 1);
    let shared = shared(&options);
    let roles = topology::build(&options, &shared, &CounterGroups::new()).unwrap();

    let Role::Actor(actor) = &roles[1] else {
        panic!("expected an actor");
    };
    let Role::Learner(learner) = &roles[2] else {
        panic!("expected a learner");
    };

    assert!(Arc::ptr_eq(&actor.model, &shared.model));
    assert!(Arc::ptr_eq(&actor.memory, &learner.memory));
    assert!(Arc::ptr_eq(&learner.actor_optimizer, &shared.actor_optimizer));
    assert!(Arc::ptr_eq(&actor.progress, &learner.progress));
}
