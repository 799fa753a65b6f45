use std::{error::Error, fmt};

use ndarray::ShapeError;
use shared_state::storage::SizeMismatchErr;

/// The policy module's result type.
pub type Result<T> = std::result::Result<T, PolicyErr>;

#[derive(Debug)]
pub enum PolicyErr {
    /// A parameter slice or a record doesn't have the layout's length.
    Size(SizeMismatchErr),
    Shape(ShapeError),
}

impl fmt::Display for PolicyErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(e) => e.fmt(f),
            Self::Shape(e) => write!(f, "shape error: {e}"),
        }
    }
}

impl Error for PolicyErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Size(e) => Some(e),
            Self::Shape(e) => Some(e),
        }
    }
}

impl From<SizeMismatchErr> for PolicyErr {
    fn from(value: SizeMismatchErr) -> Self {
        Self::Size(value)
    }
}

impl From<ShapeError> for PolicyErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}
