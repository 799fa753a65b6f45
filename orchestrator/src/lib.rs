//! Builds the shared state of a training run, spawns its roles and waits for them.

pub mod error;
pub mod probe;
pub mod supervisor;
pub mod topology;

use std::sync::Arc;

use log::{info, warn};
use shared_state::{CounterGroups, RegionSpec, SharedState, SharedStateBuilder};
use specs::{Mode, Options};

pub use error::{OrchestratorError, Result};
pub use supervisor::{ExitStatus, RoleExit, Supervisor};

/// Prepares everything a run needs before any role is spawned.
///
/// The mode is checked first, then the shapes are probed and the shared state
/// is built. In test mode the checkpoint at `model_file` is restored, when there is one.
///
/// # Arguments
/// * `options` - The run options.
///
/// # Returns
/// The mode and the shared state, or the first error found.
pub fn prepare(options: &Options) -> Result<(Mode, SharedState)> {
    let mode = options.mode()?;
    let shapes = probe::probe(options)?;

    let spec = RegionSpec::from_options(options, shapes.state, shapes.action);
    let shared = SharedStateBuilder::new().build(spec)?;

    if mode == Mode::Test {
        match &options.model_params.model_file {
            Some(path) if path.exists() => {
                shared.model.load(path)?;
                info!("restored the model from {}", path.display());
            }
            Some(path) => warn!(
                "no checkpoint at {}, testing the initial model",
                path.display()
            ),
            None => warn!("no model_file configured, testing the initial model"),
        }
    }

    Ok((mode, shared))
}

/// Runs a whole training or test session.
///
/// Every role runs on its own thread and this future resolves once every one of
/// them was joined.
///
/// # Arguments
/// * `options` - The run options.
///
/// # Returns
/// The exit of every role in spawn order, or an error if the run couldn't start,
/// in which case no role was spawned.
pub async fn run(options: Options) -> Result<Vec<RoleExit>> {
    let (mode, shared) = prepare(&options)?;
    let counters = CounterGroups::new();
    let options = Arc::new(options);

    let roles = topology::build(&options, &shared, &counters)?;
    info!("{mode:?} mode: spawning {} roles", roles.len());

    let supervisor = Supervisor::spawn(roles);
    let exits = supervisor.join().await;

    let failed = exits.iter().filter(|exit| !exit.is_clean()).count();
    if failed > 0 {
        warn!("{failed} of {} roles did not finish cleanly", exits.len());
    }

    Ok(exits)
}
