use super::ParamGen;

/// Fills a parameter subset with one repeated value, mostly useful for biases and tests.
pub struct ConstParamGen {
    value: f32,
    remaining: usize,
}

impl ConstParamGen {
    /// Creates a new `ConstParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `value` - The value every parameter starts at.
    /// * `limit` - The size of the parameter subset to fill.
    ///
    /// # Returns
    /// A new `ConstParamGen` instance.
    pub fn new(value: f32, limit: usize) -> Self {
        Self {
            value,
            remaining: limit,
        }
    }
}

impl ParamGen for ConstParamGen {
    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        let take = n.min(self.remaining);
        if take == 0 {
            return None;
        }

        self.remaining -= take;
        Some(vec![self.value; take])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_subset_yields_nothing() {
        let mut param_gen = ConstParamGen::new(0.5, 0);
        assert!(param_gen.sample(4).is_none());
    }

    #[test]
    fn splits_the_subset_in_shard_sized_chunks() {
        let mut param_gen = ConstParamGen::new(0.5, 10);

        assert_eq!(param_gen.sample(4).unwrap(), vec![0.5; 4]);
        assert_eq!(param_gen.sample(4).unwrap(), vec![0.5; 4]);
        assert_eq!(param_gen.sample(4).unwrap(), vec![0.5; 2]);
        assert!(param_gen.sample(4).is_none());
    }
}
