//! The environments actors, the evaluator and the tester interact with, and the
//! registry that builds them from the run options.

mod cart_pole;
mod environment;
mod error;
mod pendulum;

pub use cart_pole::CartPole;
pub use environment::{Environment, Step};
pub use error::{EnvErr, Result};
pub use pendulum::Pendulum;

use specs::{EnvKind, EnvParams};

/// Builds the environment `kind` refers to.
///
/// # Arguments
/// * `kind` - The registry name from the options.
/// * `params` - The parameters shared by every environment.
/// * `seed` - The seed of the environment's own randomness.
///
/// # Returns
/// A boxed environment or an `EnvErr` if the parameters are invalid.
pub fn make_env(kind: EnvKind, params: &EnvParams, seed: u64) -> Result<Box<dyn Environment>> {
    let max_steps = params.max_episode_length;
    if max_steps == 0 {
        return Err(EnvErr::ZeroEpisodeLength(kind));
    }

    let env: Box<dyn Environment> = match kind {
        EnvKind::CartPole => Box::new(CartPole::new(max_steps, seed)),
        EnvKind::Pendulum => Box::new(Pendulum::new(max_steps, seed)),
    };

    Ok(env)
}
