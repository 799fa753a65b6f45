use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use shared_state::storage::SizeMismatchErr;

use super::Result;

/// A fully connected layer `x W + b` reading its weights from a flat parameter slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dense {
    dim: (usize, usize),
}

impl Dense {
    /// Creates a new `Dense` layer with `dim.0` inputs and `dim.1` outputs.
    pub fn new(dim: (usize, usize)) -> Self {
        Self { dim }
    }

    /// Returns the amount of parameters this layer has.
    pub fn size(&self) -> usize {
        (self.dim.0 + 1) * self.dim.1
    }

    /// Computes `x W + b` for every row of `x`.
    pub fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        let (w, b) = self.view_params(params)?;
        Ok(x.dot(&w) + &b)
    }

    /// Backpropagates the output delta `d` of a forward pass over `x`.
    ///
    /// # Arguments
    /// * `params` - The parameters the forward pass used.
    /// * `x` - The input of the forward pass.
    /// * `d` - The derivative of the loss with respect to the layer's output.
    ///
    /// # Returns
    /// The flat gradient of the parameters, laid out like them, and the delta of the input.
    pub fn backward(
        &self,
        params: &[f32],
        x: ArrayView2<f32>,
        d: ArrayView2<f32>,
    ) -> Result<(Vec<f32>, Array2<f32>)> {
        let (w, _) = self.view_params(params)?;

        let dw = x.t().dot(&d);
        let db = d.sum_axis(Axis(0));
        let grad = dw.iter().chain(db.iter()).copied().collect();

        Ok((grad, d.dot(&w.t())))
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        SizeMismatchErr::check(self.size(), params.len())?;

        let w_size = self.size() - self.dim.1;
        let weights = ArrayView2::from_shape(self.dim, &params[..w_size])?;
        let biases = ArrayView1::from_shape(self.dim.1, &params[w_size..])?;
        Ok((weights, biases))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    // w = [[1, 2], [3, 4], [5, 6]], b = [0.5, -0.5]
    const PARAMS: [f32; 8] = [1., 2., 3., 4., 5., 6., 0.5, -0.5];

    #[test]
    fn forward_is_affine() {
        let layer = Dense::new((3, 2));
        let x = array![[1f32, 0., 1.], [0., 1., 0.]];

        let y = layer.forward(&PARAMS, x.view()).unwrap();
        assert_eq!(y, array![[6.5f32, 7.5], [3.5, 3.5]]);
    }

    #[test]
    fn backward_matches_the_weights_layout() {
        let layer = Dense::new((3, 2));
        let x = array![[1f32, 2., 3.]];
        let d = array![[1f32, -1.]];

        let (grad, dx) = layer.backward(&PARAMS, x.view(), d.view()).unwrap();
        assert_eq!(grad, vec![1., -1., 2., -2., 3., -3., 1., -1.]);
        assert_eq!(dx, array![[-1f32, -1., -1.]]);
    }

    #[test]
    fn wrong_parameter_count_is_an_error() {
        let layer = Dense::new((3, 2));
        let x = array![[1f32, 0., 1.]];
        assert!(layer.forward(&PARAMS[..7], x.view()).is_err());
    }
}
