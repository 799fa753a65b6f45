use crate::storage::Result;

/// Defines the strategy for updating model parameters based on calculated gradients.
///
/// An instance keeps the running statistics of one shard, so it's only ever used
/// with the parameters of that shard.
pub trait Optimizer {
    /// Updates the provided slice of parameters in place.
    ///
    /// # Arguments
    /// * `grad` - The gradient for these parameters.
    /// * `params` - The parameters to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()>;
}
