use std::fmt;

/// The dimensions of a state or action tensor, e.g. `(4,)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(Box<[usize]>);

impl Shape {
    pub fn new<D: Into<Vec<usize>>>(dims: D) -> Self {
        Self(dims.into().into_boxed_slice())
    }

    /// Returns the amount of scalars in a flat tensor of this shape.
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    /// A shape is resolved once it has at least one dimension and none of them is zero.
    pub fn is_resolved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&d| d > 0)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for dim in self.0.iter() {
            write!(f, "{dim},")?;
        }
        f.write_str(")")
    }
}
