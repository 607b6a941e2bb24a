use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid cache configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    pub initial_capacity: usize,
    pub warn_unbound_uniforms: bool,
    /// Unbind every program after a successful link instead of leaving the new
    /// one active. The previously active program is not rebound.
    pub unbind_after_link: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            warn_unbound_uniforms: true,
            unbind_after_link: false,
        }
    }
}

impl CacheConfig {
    pub fn from_json(json: &str) -> Result<CacheConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, ConfigError> {
        Ok(serde_json::to_value(self)?)
    }
}
