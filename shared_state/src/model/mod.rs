mod checkpoint;
mod global;
mod layout;

pub use checkpoint::CheckpointErr;
pub use global::GlobalModel;
pub use layout::ModelLayout;
