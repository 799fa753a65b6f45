//! The roles of a training run and the environments and model they work with.
//!
//! Every role is a blocking loop over the shared state region, handed exactly
//! the references its `Role` variant carries.

pub mod env;
pub mod error;
pub mod policy;
mod role;
pub mod workers;

pub use error::{Result, RoleErr};
pub use role::{ActorArgs, EvaluatorArgs, LearnerArgs, LoggerArgs, Role, RoleKind, TesterArgs};
