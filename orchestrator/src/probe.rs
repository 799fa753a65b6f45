use roles::env::make_env;
use shared_state::Shape;
use specs::Options;

use crate::{OrchestratorError, Result};

/// The dimensions the shared state is allocated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedShapes {
    pub state: Shape,
    pub action: Shape,
}

/// Builds a throwaway environment only to read its shapes.
///
/// The environment is dropped before returning, nothing it opened outlives the probe.
///
/// # Arguments
/// * `options` - The run options, `env_type` and `env_params` select the environment.
///
/// # Returns
/// The probed shapes or an error if the environment can't be built or reports
/// a shape with no elements.
pub fn probe(options: &Options) -> Result<ProbedShapes> {
    let shapes = {
        let env = make_env(options.env_type, &options.env_params, options.seed)?;
        ProbedShapes {
            state: env.state_shape(),
            action: env.action_shape(),
        }
    };

    for (what, shape) in [("state", &shapes.state), ("action", &shapes.action)] {
        if !shape.is_resolved() {
            return Err(OrchestratorError::UnresolvedShape {
                what,
                shape: shape.clone(),
            });
        }
    }

    log::info!(
        "probed {}: state {}, action {}",
        options.env_type,
        shapes.state,
        shapes.action
    );
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use specs::EnvKind;

    use super::*;

    #[test]
    fn probes_every_registered_environment() {
        let mut options = Options::default();

        let shapes = probe(&options).unwrap();
        assert_eq!(shapes.state, Shape::from([4]));
        assert_eq!(shapes.action, Shape::from([2]));

        options.env_type = EnvKind::Pendulum;
        let shapes = probe(&options).unwrap();
        assert_eq!(shapes.state, Shape::from([3]));
        assert_eq!(shapes.action, Shape::from([1]));
    }

    #[test]
    fn unbuildable_environment_fails_the_probe() {
        let mut options = Options::default();
        options.env_params.max_episode_length = 0;

        assert!(matches!(probe(&options), Err(OrchestratorError::Probe(_))));
    }
}
