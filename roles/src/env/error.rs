use std::{error::Error, fmt};

use shared_state::storage::SizeMismatchErr;
use specs::EnvKind;

/// The environments module's result type.
pub type Result<T> = std::result::Result<T, EnvErr>;

#[derive(Debug)]
pub enum EnvErr {
    /// An environment can't run episodes of length zero.
    ZeroEpisodeLength(EnvKind),
    /// The action handed to `step` doesn't have the environment's action shape.
    Action(SizeMismatchErr),
}

impl fmt::Display for EnvErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroEpisodeLength(kind) => {
                write!(f, "{kind}: max_episode_length must be greater than zero")
            }
            Self::Action(e) => write!(f, "invalid action: {e}"),
        }
    }
}

impl Error for EnvErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Action(e) => Some(e),
            Self::ZeroEpisodeLength(_) => None,
        }
    }
}

impl From<SizeMismatchErr> for EnvErr {
    fn from(value: SizeMismatchErr) -> Self {
        Self::Action(value)
    }
}
