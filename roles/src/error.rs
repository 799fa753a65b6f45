use std::{error::Error, fmt};

use rand_distr::NormalError;
use shared_state::{CheckpointErr, storage::SizeMismatchErr};

use crate::{env::EnvErr, policy::PolicyErr};

/// The roles module's result type.
pub type Result<T> = std::result::Result<T, RoleErr>;

/// Failures that end a role's loop early.
#[derive(Debug)]
pub enum RoleErr {
    Env(EnvErr),
    Policy(PolicyErr),
    /// A record or a gradient doesn't fit the shared state.
    Size(SizeMismatchErr),
    /// The exploration noise can't be built from `action_noise`.
    Noise(NormalError),
    Checkpoint(CheckpointErr),
}

impl fmt::Display for RoleErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(e) => write!(f, "environment error: {e}"),
            Self::Policy(e) => write!(f, "policy error: {e}"),
            Self::Size(e) => write!(f, "shared state error: {e}"),
            Self::Noise(e) => write!(f, "invalid action noise: {e}"),
            Self::Checkpoint(e) => e.fmt(f),
        }
    }
}

impl Error for RoleErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Env(e) => Some(e),
            Self::Policy(e) => Some(e),
            Self::Size(e) => Some(e),
            Self::Noise(e) => Some(e),
            Self::Checkpoint(e) => Some(e),
        }
    }
}

impl From<EnvErr> for RoleErr {
    fn from(value: EnvErr) -> Self {
        Self::Env(value)
    }
}

impl From<PolicyErr> for RoleErr {
    fn from(value: PolicyErr) -> Self {
        Self::Policy(value)
    }
}

impl From<SizeMismatchErr> for RoleErr {
    fn from(value: SizeMismatchErr) -> Self {
        Self::Size(value)
    }
}

impl From<NormalError> for RoleErr {
    fn from(value: NormalError) -> Self {
        Self::Noise(value)
    }
}

impl From<CheckpointErr> for RoleErr {
    fn from(value: CheckpointErr) -> Self {
        Self::Checkpoint(value)
    }
}
