mod replay;
mod transition;

pub use replay::ReplayBuffer;
pub use transition::{Transition, TransitionShape};
