//! File-based configuration loading.

use std::path::Path;

use super::CompileConfig;
use crate::error::{RegexpError, Result};

impl CompileConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RegexpError::config(e.to_string()))
    }

    /// Load a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegexpError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}
