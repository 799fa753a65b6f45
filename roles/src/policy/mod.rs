//! The linear actor-critic every role evaluates against its view of the global model.

mod batch;
mod dense;
mod error;
mod linear;

pub use batch::Batch;
pub use dense::Dense;
pub use error::{PolicyErr, Result};
pub use linear::{LinearActorCritic, soft_update};
