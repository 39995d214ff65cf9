//! # Generator Configuration
//!
//! Optional YAML file passed with `--config`. Every key has a default, so
//! a partial file (or none at all) is valid. Command-line flags override
//! file values.
//!
//! ```yaml
//! struct_prefix: C_
//! output_dir: output_json
//! api_prefix: legacy
//! scan_sibling_documents: true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings shared by the subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Structs whose name starts with this prefix (case-insensitive) get a sample.
    pub struct_prefix: String,
    /// Where sample JSON files are written.
    pub output_dir: PathBuf,
    /// Prefix of generated API files and functions.
    pub api_prefix: String,
    /// Register every document in each input's directory, not only the inputs.
    pub scan_sibling_documents: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            struct_prefix: "C_".to_string(),
            output_dir: PathBuf::from("output_json"),
            api_prefix: "legacy".to_string(),
            scan_sibling_documents: true,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file. An empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
