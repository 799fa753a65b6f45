use std::{
    error::Error,
    fmt::{self, Display},
};

/// The specific result type for size mismatch checks inside the shared state.
pub type Result<T> = std::result::Result<T, SizeMismatchErr>;

/// Error returned whenever the length of a gradient, an output buffer or a record
/// doesn't match the length of the shared storage it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatchErr {
    pub expected: usize,
    pub got: usize,
}

impl SizeMismatchErr {
    /// Checks that `got` equals `expected`.
    ///
    /// # Returns
    /// A `SizeMismatchErr` carrying both lengths if they differ.
    pub fn check(expected: usize, got: usize) -> Result<()> {
        if expected == got {
            Ok(())
        } else {
            Err(Self { expected, got })
        }
    }
}

impl Display for SizeMismatchErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size mismatch: expected {} values, got {}",
            self.expected, self.got
        )
    }
}

impl Error for SizeMismatchErr {}
