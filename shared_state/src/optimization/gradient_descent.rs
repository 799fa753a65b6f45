use super::Optimizer;
use crate::storage::{Result, SizeMismatchErr};

/// Plain stochastic gradient descent, keeps no state besides the learning rate.
#[derive(Debug)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        SizeMismatchErr::check(params.len(), grad.len())?;

        let lr = self.learning_rate;
        params.iter_mut().zip(grad).for_each(|(p, g)| *p -= lr * g);

        Ok(())
    }
}
