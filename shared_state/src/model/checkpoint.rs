use std::{collections::HashMap, error::Error, fmt, fs, io, path::Path};

use safetensors::tensor::{Dtype, SafeTensorError, SafeTensors, TensorView, serialize_to_file};

use super::GlobalModel;
use crate::{optimization::Subset, storage::SizeMismatchErr};

const F32_SIZE: usize = size_of::<f32>();

/// Failures while saving or restoring a model checkpoint.
#[derive(Debug)]
pub enum CheckpointErr {
    Io(io::Error),
    Format(SafeTensorError),
    WrongDtype { tensor: &'static str, got: Dtype },
    Size { tensor: &'static str, source: SizeMismatchErr },
}

impl fmt::Display for CheckpointErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "checkpoint io error: {e}"),
            Self::Format(e) => write!(f, "invalid checkpoint: {e}"),
            Self::WrongDtype { tensor, got } => {
                write!(f, "tensor {tensor} should be F32, got {got:?}")
            }
            Self::Size { tensor, source } => write!(f, "tensor {tensor}: {source}"),
        }
    }
}

impl Error for CheckpointErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Size { source, .. } => Some(source),
            Self::WrongDtype { .. } => None,
        }
    }
}

impl From<io::Error> for CheckpointErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SafeTensorError> for CheckpointErr {
    fn from(value: SafeTensorError) -> Self {
        Self::Format(value)
    }
}

fn tensor_name(subset: Subset) -> &'static str {
    match subset {
        Subset::Actor => "actor",
        Subset::Critic => "critic",
    }
}

impl GlobalModel {
    /// Writes both parameter subsets to a safetensors file.
    ///
    /// The snapshot is approximate, a learner may update some shards while they're copied.
    ///
    /// # Arguments
    /// * `path` - Where to write the checkpoint.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CheckpointErr> {
        let actor = self.actor().snapshot();
        let critic = self.critic().snapshot();

        let mut tensors = HashMap::with_capacity(2);
        for (subset, params) in [(Subset::Actor, &actor), (Subset::Critic, &critic)] {
            let bytes: &[u8] = bytemuck::cast_slice(params);
            let view = TensorView::new(Dtype::F32, vec![params.len()], bytes)?;
            tensors.insert(tensor_name(subset).to_string(), view);
        }

        serialize_to_file(&tensors, &None, path.as_ref())?;
        Ok(())
    }

    /// Restores both parameter subsets from a safetensors file written by `save`.
    ///
    /// # Arguments
    /// * `path` - The checkpoint to read.
    ///
    /// # Returns
    /// An error if the file can't be read or doesn't match this model's layout,
    /// in which case no subset was modified.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(), CheckpointErr> {
        let bytes = fs::read(path)?;
        let tensors = SafeTensors::deserialize(&bytes)?;

        let actor = read_subset(&tensors, Subset::Actor, self.actor().len())?;
        let critic = read_subset(&tensors, Subset::Critic, self.critic().len())?;

        self.actor()
            .push_params(&actor)
            .and_then(|_| self.critic().push_params(&critic))
            .map_err(|source| CheckpointErr::Size {
                tensor: "model",
                source,
            })
    }
}

fn read_subset(
    tensors: &SafeTensors<'_>,
    subset: Subset,
    expected: usize,
) -> Result<Vec<f32>, CheckpointErr> {
    let tensor = tensor_name(subset);
    let view = tensors.tensor(tensor)?;

    if view.dtype() != Dtype::F32 {
        return Err(CheckpointErr::WrongDtype {
            tensor,
            got: view.dtype(),
        });
    }

    let params: Vec<f32> = view
        .data()
        .chunks_exact(F32_SIZE)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    SizeMismatchErr::check(expected, params.len())
        .map_err(|source| CheckpointErr::Size { tensor, source })?;

    Ok(params)
}
