//! The region every role of a training run shares: the global model, the replay
//! buffer, the two optimizer states and the counter groups.

pub mod counters;
pub mod initialization;
pub mod memory;
pub mod model;
pub mod optimization;
pub mod region;
mod shape;
pub mod storage;

pub use counters::CounterGroups;
pub use memory::{ReplayBuffer, Transition, TransitionShape};
pub use model::{CheckpointErr, GlobalModel, ModelLayout};
pub use optimization::{OptimizerState, Subset};
pub use region::{BuildErr, RegionSpec, SharedState, SharedStateBuilder};
pub use shape::Shape;
