//! Service manifest YAML schema

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root manifest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Env file loaded into the process environment before any service starts
    #[serde(default)]
    pub env_file: Option<String>,

    /// Service definitions (ordered map; names are unique by construction)
    #[serde(default)]
    pub services: IndexMap<String, ServiceSpec>,
}

/// A single service: shell command plus dependency addresses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Shell command, interpreted by `bash -c`
    pub cmd: String,

    /// Addresses that must be ready before the command starts
    #[serde(default)]
    pub wait_for: Vec<String>,
}

impl Manifest {
    /// Load a manifest from a YAML file
    pub fn from_file(path: &str) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a manifest from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_yaml::from_str(content).map_err(ManifestError::Parse)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest configuration
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (name, service) in &self.services {
            if service.cmd.trim().is_empty() {
                return Err(ManifestError::Validation(format!(
                    "Service '{}': 'cmd' must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Errors that can occur when loading a manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
