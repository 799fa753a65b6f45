mod error;
mod shard;
mod store;

pub use error::{Result, SizeMismatchErr};
pub(crate) use shard::ParamShard;
pub use store::ParamStore;
