//! config.rs
//! Runtime codec options.

use serde::{Deserialize, Serialize};

use crate::framing::FlagPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// How frame flag bytes are screened when reading.
    pub flag_policy: FlagPolicy,
}

impl CodecConfig {
    pub fn new(flag_policy: FlagPolicy) -> Self {
        Self { flag_policy }
    }

    pub fn strict() -> Self {
        Self::new(FlagPolicy::Strict)
    }
}
