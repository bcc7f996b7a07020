//! Runtime configuration, loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ScholiaResult, StoreError};

/// Configuration for the CLI and embedding applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholiaConfig {
    /// Directory holding the redb database.
    pub data_dir: PathBuf,
    /// Base URL published content is resolvable under.
    pub publish_base_url: String,
    /// DOI prefix handed to the registrar.
    pub doi_prefix: String,
}

impl Default for ScholiaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            publish_base_url: "https://scholia.example.org".into(),
            doi_prefix: "10.5555".into(),
        }
    }
}

impl ScholiaConfig {
    pub fn load(path: &Path) -> ScholiaResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Io { source: e })?;
        let config = toml::from_str(&raw).map_err(|e| StoreError::Serialization {
            message: format!("invalid config {}: {e}", path.display()),
        })?;
        Ok(config)
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> ScholiaResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> ScholiaResult<()> {
        let raw = toml::to_string_pretty(self).map_err(|e| StoreError::Serialization {
            message: format!("failed to serialize config: {e}"),
        })?;
        std::fs::write(path, raw).map_err(|e| StoreError::Io { source: e })?;
        Ok(())
    }
}
