use std::{env, fs, process};

use orchestrator::{OrchestratorError, prepare, run};
use roles::RoleKind;
use specs::{Options, OptionsErr};

fn small_options(mode: u8) -> Options {
    let json = r#"{
        "num_actors": 2,
        "num_learners": 1,
        "env_params": { "max_episode_length": 20 },
        "memory_params": { "capacity": 128 },
        "agent_params": {
            "steps": 50,
            "learn_start": 16,
            "batch_size": 8,
            "logger_freq_ms": 5,
            "evaluator_freq": 10,
            "evaluator_nepisodes": 1,
            "tester_nepisodes": 2
        }
    }"#;

    Options {
        mode,
        ..Options::from_json(json).unwrap()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn train_run_joins_every_role_in_spawn_order() {
    let exits = run(small_options(1)).await.unwrap();

    let layout: Vec<_> = exits.iter().map(|e| (e.kind, e.ordinal)).collect();
    assert_eq!(
        layout,
        [
            (RoleKind::Logger, 0),
            (RoleKind::Actor, 1),
            (RoleKind::Actor, 2),
            (RoleKind::Learner, 3),
            (RoleKind::Evaluator, 4),
        ]
    );
    assert!(exits.iter().all(|e| e.is_clean()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_run_spawns_one_tester() {
    let exits = run(small_options(2)).await.unwrap();

    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].kind, RoleKind::Tester);
    assert_eq!(exits[0].ordinal, 5);
    assert!(exits[0].is_clean());
}

#[tokio::test]
async fn invalid_mode_is_rejected_before_anything_is_built() {
    let mut options = small_options(9);
    // would fail the shape probe if the mode were accepted
    options.env_params.max_episode_length = 0;

    let err = run(options).await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::Options(OptionsErr::InvalidMode(9))
    ));
}

#[test]
fn test_mode_restores_the_checkpoint() {
    let path = env::temp_dir().join(format!("orchestrator-restore-{}.safetensors", process::id()));

    let trained = Options {
        seed: 1,
        ..small_options(1)
    };
    let (_, source) = prepare(&trained).unwrap();
    source.model.save(&path).unwrap();

    let mut tested = Options {
        seed: 2,
        ..small_options(2)
    };
    tested.model_params.model_file = Some(path.clone());
    let (_, target) = prepare(&tested).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(target.model.actor().snapshot(), source.model.actor().snapshot());
    assert_eq!(target.model.critic().snapshot(), source.model.critic().snapshot());
}
