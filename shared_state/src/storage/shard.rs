use parking_lot::RwLock;

use crate::{
    optimization::Optimizer,
    storage::{Result, SizeMismatchErr},
};

/// A contiguous slice of a parameter subset guarded by its own lock.
///
/// Readers of different shards never contend, and a learner updating one shard
/// doesn't stop readers from pulling the others.
#[derive(Debug)]
pub struct ParamShard {
    nparams: usize,
    params: RwLock<Box<[f32]>>,
}

impl ParamShard {
    /// Creates a new `ParamShard`.
    ///
    /// # Arguments
    /// * `params` - The initial state of the parameters.
    ///
    /// # Returns
    /// A new `ParamShard` instance.
    pub fn new(params: Vec<f32>) -> Self {
        Self {
            nparams: params.len(),
            params: RwLock::new(params.into_boxed_slice()),
        }
    }

    pub fn len(&self) -> usize {
        self.nparams
    }

    /// Applies `grad` to the parameters in place through `optimizer`.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer state bound to this shard.
    /// * `grad` - The gradient slice for this shard.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `grad` isn't the same size as this shard.
    pub fn apply<O: Optimizer + ?Sized>(&self, optimizer: &mut O, grad: &[f32]) -> Result<()> {
        SizeMismatchErr::check(self.nparams, grad.len())?;

        let mut params = self.params.write();
        optimizer.update_params(grad, &mut params)
    }

    /// Copies the shard's parameters into `out`.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `out` isn't the same size as this shard.
    pub fn pull_params(&self, out: &mut [f32]) -> Result<()> {
        SizeMismatchErr::check(self.nparams, out.len())?;

        out.copy_from_slice(&self.params.read());
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<f32> {
        self.params.read().to_vec()
    }

    /// Overwrites the shard's parameters with `src`.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `src` isn't the same size as this shard.
    pub fn push_params(&self, src: &[f32]) -> Result<()> {
        SizeMismatchErr::check(self.nparams, src.len())?;

        self.params.write().copy_from_slice(src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AddOptimizer;

    impl Optimizer for AddOptimizer {
        fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
            params.iter_mut().zip(grad).for_each(|(p, g)| *p += g);
            Ok(())
        }
    }

    #[test]
    fn apply_then_pull() {
        let shard = ParamShard::new(vec![0.; 3]);

        shard.apply(&mut AddOptimizer, &[1., 2., 3.]).unwrap();
        shard.apply(&mut AddOptimizer, &[1., 1., 1.]).unwrap();

        let mut out = [0.; 3];
        shard.pull_params(&mut out).unwrap();
        assert_eq!(out, [2., 3., 4.]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let shard = ParamShard::new(vec![0.; 3]);

        let err = shard.apply(&mut AddOptimizer, &[1.]).unwrap_err();
        assert_eq!(err, SizeMismatchErr { expected: 3, got: 1 });
        assert!(shard.pull_params(&mut [0.; 4]).is_err());
        assert!(shard.push_params(&[0.; 2]).is_err());
    }
}
