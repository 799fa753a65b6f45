use std::{error::Error, fmt};

use roles::env::EnvErr;
use shared_state::{BuildErr, CheckpointErr, Shape};
use specs::OptionsErr;

/// The orchestrator's result type.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Every failure that aborts a run before any role is spawned.
#[derive(Debug)]
pub enum OrchestratorError {
    /// Unreadable options or an unsupported mode.
    Options(OptionsErr),
    /// The shape probe couldn't build its environment.
    Probe(EnvErr),
    /// The probed environment reported an empty or zero sized shape.
    UnresolvedShape { what: &'static str, shape: Shape },
    Build(BuildErr),
    /// The checkpoint the tester should run couldn't be restored.
    Checkpoint(CheckpointErr),
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(e) => e.fmt(f),
            Self::Probe(e) => write!(f, "shape probe failed: {e}"),
            Self::UnresolvedShape { what, shape } => {
                write!(f, "shape probe failed: the {what} shape {shape} is not usable")
            }
            Self::Build(e) => write!(f, "cannot build the shared state: {e}"),
            Self::Checkpoint(e) => e.fmt(f),
        }
    }
}

impl Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Options(e) => Some(e),
            Self::Probe(e) => Some(e),
            Self::Build(e) => Some(e),
            Self::Checkpoint(e) => Some(e),
            Self::UnresolvedShape { .. } => None,
        }
    }
}

impl From<OptionsErr> for OrchestratorError {
    fn from(value: OptionsErr) -> Self {
        Self::Options(value)
    }
}

impl From<EnvErr> for OrchestratorError {
    fn from(value: EnvErr) -> Self {
        Self::Probe(value)
    }
}

impl From<BuildErr> for OrchestratorError {
    fn from(value: BuildErr) -> Self {
        Self::Build(value)
    }
}

impl From<CheckpointErr> for OrchestratorError {
    fn from(value: CheckpointErr) -> Self {
        Self::Checkpoint(value)
    }
}
