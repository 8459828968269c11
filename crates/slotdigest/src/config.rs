//! Hashing configuration
//!
//! Stored as TOML:
//!
//! ```toml
//! backend = "blake3"      # blake3 | sha256 | keccak256
//! strategy = "sequential" # sequential | patched
//! max_depth = 64
//! ```
//!
//! Every key is optional. Digests produced under different backends are
//! unrelated, so all parties hashing the same values must share a backend.

use crate::compose::Strategy;
use crate::error::{Error, Result};
use crate::memory::DEFAULT_MAX_DEPTH;
use crate::primitive::{Blake3, HashPrimitive, Keccak256, Sha256};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Hash primitive selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Blake3,
    Sha256,
    Keccak256,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Blake3 => Blake3::NAME,
            Backend::Sha256 => Sha256::NAME,
            Backend::Keccak256 => Keccak256::NAME,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    /// Hash primitive
    pub backend: Backend,

    /// Traversal for composites; does not affect digests
    pub strategy: Strategy,

    /// Pointer hops the memory reader follows before giving up
    pub max_depth: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            strategy: Strategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HashConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        debug!(
            backend = %config.backend,
            strategy = ?config.strategy,
            max_depth = config.max_depth,
            "loaded hash config"
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        Ok(())
    }
}
