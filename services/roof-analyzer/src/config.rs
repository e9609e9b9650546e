//! Analyzer configuration.
//!
//! A YAML file may carry an `extraction` section, a `packing` section, or
//! both. Any section left out is read from the environment instead.

use anyhow::{anyhow, Context, Result};
use panel_layout::PackingConfig;
use roof_extraction::ExtractionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzerConfig {
    pub extraction: ExtractionConfig,
    pub packing: PackingConfig,
}

/// On-disk form, where every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalyzerConfigFile {
    #[serde(default)]
    extraction: Option<ExtractionConfig>,
    #[serde(default)]
    packing: Option<PackingConfig>,
}

impl AnalyzerConfig {
    /// Load configuration from environment variables only.
    pub fn from_env() -> Self {
        Self {
            extraction: ExtractionConfig::from_env(),
            packing: PackingConfig::from_env(),
        }
    }

    /// Load a YAML config file, falling back to the environment for
    /// missing sections.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config in {:?}", path.as_ref()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: AnalyzerConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config YAML")?;

        let config = Self {
            extraction: file.extraction.unwrap_or_else(ExtractionConfig::from_env),
            packing: file.packing.unwrap_or_else(PackingConfig::from_env),
        };
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let config = Self::from_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.extraction
            .validate()
            .map_err(|e| anyhow!("extraction: {}", e))?;
        self.packing
            .validate()
            .map_err(|e| anyhow!("packing: {}", e))?;
        Ok(())
    }
}
