//! Serialization and deserialization of cut files.
//!
//! A cut file is JSON holding a format version, an optional name and the
//! list of top-level cuts of a job.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cut::Cut;

/// Cut file format version
const FILE_FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    FILE_FORMAT_VERSION.to_string()
}

/// Complete cut file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cuts: Vec<Cut>,
}

impl CutFile {
    pub fn new(cuts: Vec<Cut>) -> Self {
        Self {
            version: default_version(),
            name: None,
            cuts,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse cut file")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize cuts")
    }

    /// Save cuts to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json).context("Failed to write cut file")?;
        Ok(())
    }

    /// Load cuts from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read cut file {}", path.as_ref().display()))?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defaults() {
        let file = CutFile::from_json(r#"{"cuts": []}"#).unwrap();
        assert_eq!(file.version, "1.0");
        assert!(file.cuts.is_empty());
    }

    #[test]
    fn test_unknown_cut_type_fails() {
        let err = CutFile::from_json(r#"{"cuts": [{"type": "RectangularPocket"}]}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse cut file"));
    }
}
