use std::{error::Error, fmt, io};

/// The specs module's result type.
pub type Result<T> = std::result::Result<T, OptionsErr>;

/// Failures while loading or validating the run options.
#[derive(Debug)]
pub enum OptionsErr {
    Io(io::Error),
    Json(serde_json::Error),
    /// `mode` must be `1` (train) or `2` (test).
    InvalidMode(u8),
}

impl fmt::Display for OptionsErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read options: {e}"),
            Self::Json(e) => write!(f, "invalid options: {e}"),
            Self::InvalidMode(mode) => {
                write!(f, "unsupported mode {mode}, expected 1 (train) or 2 (test)")
            }
        }
    }
}

impl Error for OptionsErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidMode(_) => None,
        }
    }
}

impl From<io::Error> for OptionsErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for OptionsErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
