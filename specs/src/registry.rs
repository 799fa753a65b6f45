//! Selectors for the concrete factories of each external collaborator.
//!
//! An unknown name is rejected when the options are parsed.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvKind {
    #[default]
    CartPole,
    Pendulum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Fixed capacity ring, oldest records are overwritten first.
    #[default]
    Ring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Linear deterministic actor and linear critic.
    #[default]
    Linear,
}

impl fmt::Display for EnvKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CartPole => f.write_str("cart_pole"),
            Self::Pendulum => f.write_str("pendulum"),
        }
    }
}
