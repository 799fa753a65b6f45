mod error;
mod options;
pub mod optimizer;
pub mod param_gen;
pub mod registry;

pub use error::{OptionsErr, Result};
pub use optimizer::OptimizerSpec;
pub use options::{AgentParams, EnvParams, MemoryParams, Mode, ModelParams, Options};
pub use param_gen::{DistributionSpec, ParamGenSpec};
pub use registry::{EnvKind, MemoryKind, ModelKind};
