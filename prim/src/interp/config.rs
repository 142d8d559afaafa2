//! Interpreter configuration

use crate::keyword::Keywords;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default ceiling on nested evaluation depth
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Settings for one [`Interpreter`](super::Interpreter).
///
/// Loadable from TOML; missing keys keep their defaults:
///
/// ```toml
/// max_depth = 2000
///
/// [keywords]
/// true_lit = "#t"
/// false_lit = "#f"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpConfig {
    /// Spellings of the boolean literals
    pub keywords: Keywords,
    /// Nested evaluations allowed before failing with a stack overflow
    pub max_depth: usize,
}

impl Default for InterpConfig {
    fn default() -> Self {
        InterpConfig {
            keywords: Keywords::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("true and false keywords must differ, both are `{0}`")]
    KeywordClash(String),
}

impl InterpConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: InterpConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Check settings that deserialization alone cannot.
    ///
    /// Call again after changing fields by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.true_lit == self.keywords.false_lit {
            return Err(ConfigError::KeywordClash(self.keywords.true_lit.clone()));
        }
        Ok(())
    }
}
