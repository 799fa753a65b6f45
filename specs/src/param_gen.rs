use serde::{Deserialize, Serialize};

/// The specification for the distribution a random parameter generator samples from.
///
/// The fan based variants take `fan_in` and `fan_out` from the layer they initialize,
/// so they don't carry them.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionSpec {
    Uniform { low: f32, high: f32 },
    Normal { mean: f32, std_dev: f32 },
    XavierUniform,
    LecunUniform,
    Kaiming,
}

/// The specification for the `ParamGen` trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamGenSpec {
    Const { value: f32 },
    Rand { distribution: DistributionSpec },
}

impl Default for ParamGenSpec {
    fn default() -> Self {
        Self::Rand {
            distribution: DistributionSpec::XavierUniform,
        }
    }
}
