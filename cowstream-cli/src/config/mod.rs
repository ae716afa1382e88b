//! Configuration file support
//!
//! Settings are read from an optional TOML file; command-line flags take
//! precedence over anything set here.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Corpus reading configuration
    #[serde(default)]
    pub corpus: CorpusSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Corpus-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorpusSection {
    /// Input files are gzip-compressed
    pub gzipped: bool,

    /// Produce structure traces
    pub structure: bool,

    /// Sentence-level element name
    pub sentence_tag: String,

    /// Continue with the next file when one fails
    pub skip_errors: bool,

    /// Glob used for directory inputs (default depends on `gzipped`)
    pub pattern: Option<String>,
}

impl Default for CorpusSection {
    fn default() -> Self {
        Self {
            gzipped: true,
            structure: false,
            sentence_tag: "s".to_string(),
            skip_errors: false,
            pattern: None,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Default output format
    pub default_format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}
