use std::{error::Error, fmt};

use crate::{Shape, initialization::RandErr, storage::SizeMismatchErr};

/// The region builder's result type.
pub type Result<T> = std::result::Result<T, BuildErr>;

/// Reasons the shared state region can't be built.
///
/// Nothing built before the failure is kept, the caller never sees a partial region.
#[derive(Debug)]
pub enum BuildErr {
    /// A shape wasn't resolved before the build, it has no dimensions or a zero one.
    MissingShape(&'static str),
    /// The buffer and the model disagree on a shape.
    ShapeMismatch {
        what: &'static str,
        memory: Shape,
        model: Shape,
    },
    /// The buffer's reward or terminal width isn't the model's number of tasks.
    TaskMismatch {
        what: &'static str,
        memory: usize,
        model: usize,
    },
    NoTasks,
    ZeroCapacity,
    Rand(RandErr),
    Size(SizeMismatchErr),
}

impl fmt::Display for BuildErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingShape(what) => write!(f, "the {what} shape is not resolved"),
            Self::ShapeMismatch {
                what,
                memory,
                model,
            } => write!(
                f,
                "the replay buffer's {what} shape {memory} doesn't match the model's {model}"
            ),
            Self::TaskMismatch {
                what,
                memory,
                model,
            } => write!(
                f,
                "the replay buffer's {what} width {memory} doesn't match the model's {model} tasks"
            ),
            Self::NoTasks => f.write_str("the model needs at least one task"),
            Self::ZeroCapacity => f.write_str("the replay buffer needs a non zero capacity"),
            Self::Rand(e) => e.fmt(f),
            Self::Size(e) => write!(f, "model layout: {e}"),
        }
    }
}

impl Error for BuildErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rand(e) => Some(e),
            Self::Size(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RandErr> for BuildErr {
    fn from(value: RandErr) -> Self {
        Self::Rand(value)
    }
}

impl From<SizeMismatchErr> for BuildErr {
    fn from(value: SizeMismatchErr) -> Self {
        Self::Size(value)
    }
}
