use std::{cell::RefCell, rc::Rc};

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::{ParamGen, Result};

/// A parameter generator that samples a probabilistic distribution.
///
/// Several generators may share one rng, so that initialising the actor and the
/// critic subsets from the same seed is reproducible.
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: Rc<RefCell<R>>,
    distribution: D,
    remaining: usize,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `rng` - A shared random number generator.
    /// * `distribution` - The distribution to sample from.
    /// * `limit` - The size of the parameter subset to fill.
    pub fn new(rng: Rc<RefCell<R>>, distribution: D, limit: usize) -> Self {
        Self {
            rng,
            distribution,
            remaining: limit,
        }
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f32>> {
    /// Creates a generator with a uniform distribution over `[low, high)`.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high or not finite).
    pub fn uniform(rng: Rc<RefCell<R>>, limit: usize, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?, limit))
    }

    /// Creates a generator using Xavier uniform initialization.
    ///
    /// # Arguments
    /// * `fan_in` - The number of inputs of the layer.
    /// * `fan_out` - The number of outputs of the layer.
    pub fn xavier_uniform(
        rng: Rc<RefCell<R>>,
        limit: usize,
        fan_in: usize,
        fan_out: usize,
    ) -> Result<Self> {
        let range = (6. / (fan_in + fan_out) as f32).sqrt();
        Self::uniform(rng, limit, -range, range)
    }

    /// Creates a generator using LeCun uniform initialization.
    pub fn lecun_uniform(rng: Rc<RefCell<R>>, limit: usize, fan_in: usize) -> Result<Self> {
        let range = (3. / fan_in as f32).sqrt();
        Self::uniform(rng, limit, -range, range)
    }
}

impl<R: Rng> RandParamGen<R, Normal<f32>> {
    /// Creates a generator with a normal distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is negative or not finite.
    pub fn normal(rng: Rc<RefCell<R>>, limit: usize, mean: f32, std_dev: f32) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?, limit))
    }

    /// Creates a generator using Kaiming normal initialization.
    pub fn kaiming(rng: Rc<RefCell<R>>, limit: usize, fan_in: usize) -> Result<Self> {
        let std_dev = (2. / fan_in as f32).sqrt();
        Self::normal(rng, limit, 0., std_dev)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<R, D> {
    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        let take = n.min(self.remaining);
        if take == 0 {
            return None;
        }

        self.remaining -= take;

        let mut rng = self.rng.borrow_mut();
        let sample = (0..take)
            .map(|_| self.distribution.sample(&mut *rng))
            .collect();

        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn seeded_rng() -> Rc<RefCell<StdRng>> {
        Rc::new(RefCell::new(StdRng::seed_from_u64(42)))
    }

    #[test]
    fn respects_the_limit() {
        let mut param_gen = RandParamGen::normal(seeded_rng(), 10, 0., 1.).unwrap();

        assert_eq!(param_gen.sample(7).unwrap().len(), 7);
        assert_eq!(param_gen.sample(7).unwrap().len(), 3);
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn xavier_uniform_stays_in_range() {
        let range = (6f32 / 6.).sqrt();
        let mut param_gen = RandParamGen::xavier_uniform(seeded_rng(), 100, 4, 2).unwrap();

        let sample = param_gen.sample(100).unwrap();
        assert!(sample.iter().all(|p| (-range..range).contains(p)));
    }

    #[test]
    fn same_seed_same_parameters() {
        let mut a = RandParamGen::kaiming(seeded_rng(), 8, 4).unwrap();
        let mut b = RandParamGen::kaiming(seeded_rng(), 8, 4).unwrap();
        assert_eq!(a.sample(8), b.sample(8));
    }

    #[test]
    fn invalid_range_is_an_error() {
        assert!(RandParamGen::uniform(seeded_rng(), 4, 1., -1.).is_err());
        assert!(RandParamGen::normal(seeded_rng(), 4, 0., f32::NAN).is_err());
    }
}
