use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicU64, Ordering},
};

use rayon::prelude::*;

use crate::{
    initialization::ParamGen,
    optimization::OptimizerState,
    storage::{ParamShard, Result, SizeMismatchErr},
};

/// Partitions one parameter subset of the model in shards and leverages
/// parallelization to read and write it as fast as possible.
///
/// Reads are approximate: a pull running next to an update may observe some
/// shards before the update and some after it.
#[derive(Debug)]
pub struct ParamStore {
    nparams: usize,
    version: AtomicU64,
    shards: Box<[ParamShard]>,
    shard_size: NonZeroUsize,
}

impl ParamStore {
    /// Creates a new `ParamStore`.
    ///
    /// # Arguments
    /// * `shard_size` - The maximum amount of parameters per shard.
    /// * `param_gen` - A parameter generator, its limit is the size of the subset.
    ///
    /// # Returns
    /// A new `ParamStore` instance.
    pub fn new<PG: ParamGen>(shard_size: NonZeroUsize, mut param_gen: PG) -> Self {
        let mut nparams = 0;
        let mut shards = Vec::new();

        while let Some(params) = param_gen.sample(shard_size.get()) {
            nparams += params.len();
            shards.push(ParamShard::new(params));
        }

        Self {
            nparams,
            version: AtomicU64::new(0),
            shards: shards.into_boxed_slice(),
            shard_size,
        }
    }

    /// Returns the amount of parameters in the store.
    pub fn len(&self) -> usize {
        self.nparams
    }

    pub fn is_empty(&self) -> bool {
        self.nparams == 0
    }

    /// Returns the length of every shard, in order.
    pub fn shard_lens(&self) -> Vec<usize> {
        self.shards.iter().map(ParamShard::len).collect()
    }

    /// Returns how many updates were applied to the store so far.
    ///
    /// Readers compare versions to skip pulling parameters that didn't change.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Applies a full gradient to the parameters through `optimizer`.
    ///
    /// This triggers a parallel update across all shards, each one locking its
    /// own optimizer state and its own parameters.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer state bound to this subset.
    /// * `grad` - A flat slice with the gradient of the whole subset.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `grad` or the optimizer layout don't match the store.
    pub fn apply(&self, optimizer: &OptimizerState, grad: &[f32]) -> Result<()> {
        SizeMismatchErr::check(self.nparams, grad.len())?;
        SizeMismatchErr::check(self.shards.len(), optimizer.shards())?;

        self.shards
            .par_iter()
            .zip(grad.par_chunks(self.shard_size.get()))
            .enumerate()
            .try_for_each(|(i, (shard, grad_slice))| {
                optimizer.with_shard(i, |optim| shard.apply(optim, grad_slice))
            })?;

        self.version.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// Gathers all the sharded parameters into a local buffer.
    ///
    /// # Arguments
    /// * `out` - A mutable slice where the parameters will be copied.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `out` isn't the same size as the store.
    pub fn pull_params(&self, out: &mut [f32]) -> Result<()> {
        SizeMismatchErr::check(self.nparams, out.len())?;

        self.shards
            .par_iter()
            .zip(out.par_chunks_mut(self.shard_size.get()))
            .try_for_each(|(shard, out_slice)| shard.pull_params(out_slice))
    }

    /// Copies the parameters into a newly allocated buffer.
    pub fn snapshot(&self) -> Vec<f32> {
        self.shards
            .iter()
            .flat_map(|shard| shard.snapshot())
            .collect()
    }

    /// Overwrites every parameter with `src`, used when restoring a checkpoint.
    ///
    /// # Returns
    /// A `SizeMismatchErr` if `src` isn't the same size as the store.
    pub fn push_params(&self, src: &[f32]) -> Result<()> {
        SizeMismatchErr::check(self.nparams, src.len())?;

        self.shards
            .par_iter()
            .zip(src.par_chunks(self.shard_size.get()))
            .try_for_each(|(shard, src_slice)| shard.push_params(src_slice))?;

        self.version.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        initialization::ConstParamGen,
        optimization::{GradientDescent, Subset},
    };

    fn create_test_store(params: usize, shard_size: usize) -> ParamStore {
        let shard_size = NonZeroUsize::new(shard_size).unwrap();
        ParamStore::new(shard_size, ConstParamGen::new(0., params))
    }

    fn sgd_state(store: &ParamStore) -> OptimizerState {
        OptimizerState::new(Subset::Actor, &store.shard_lens(), |_| {
            GradientDescent::new(1.)
        })
    }

    #[test]
    fn ragged_shards_cover_every_parameter() {
        let store = create_test_store(105, 10);

        assert_eq!(store.len(), 105);
        assert_eq!(store.shard_lens().len(), 11);
        assert_eq!(store.shard_lens().last(), Some(&5));
    }

    #[test]
    fn apply_updates_in_place_and_bumps_version() {
        const PARAMS: usize = 15;

        let store = create_test_store(PARAMS, 8);
        let optimizer = sgd_state(&store);
        assert_eq!(store.version(), 0);

        store.apply(&optimizer, &[1.; PARAMS]).unwrap();
        assert_eq!(store.version(), 1);

        let mut out = [0.; PARAMS];
        store.pull_params(&mut out).unwrap();
        assert_eq!(out, [-1.; PARAMS]);
    }

    #[test]
    fn apply_rejects_a_foreign_optimizer_layout() {
        let store = create_test_store(10, 5);
        let other = create_test_store(10, 2);
        let optimizer = sgd_state(&other);

        assert!(store.apply(&optimizer, &[1.; 10]).is_err());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn push_then_snapshot() {
        let store = create_test_store(6, 4);
        let src = [1., 2., 3., 4., 5., 6.];

        store.push_params(&src).unwrap();
        assert_eq!(store.snapshot(), src);
        assert!(store.push_params(&src[..5]).is_err());
    }
}
