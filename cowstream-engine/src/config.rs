//! Configuration types for the engine

use crate::error::{EngineError, Result};
use cowstream_core::SENTENCE_TAG;

/// Default corpus file naming convention
pub const DEFAULT_PATTERN: &str = "*.xml.gz";

/// What the corpus iterator does when a file fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Yield the error and end iteration
    #[default]
    Abort,
    /// Log the error and continue with the next file
    Skip,
}

/// Settings for walking a single stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Sentence-level element name
    pub sentence_tag: String,
    /// Produce structure traces instead of plain token lists
    pub structure: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            sentence_tag: SENTENCE_TAG.to_string(),
            structure: false,
        }
    }
}

impl WalkerConfig {
    /// Plain token lists for `<s>` elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Structure traces for `<s>` elements
    pub fn structured() -> Self {
        Self {
            structure: true,
            ..Self::default()
        }
    }
}

/// Settings for iterating over a whole corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Files are gzip-compressed
    pub gzipped: bool,
    /// Produce structure traces instead of plain token lists
    pub structure: bool,
    /// Sentence-level element name
    pub sentence_tag: String,
    /// Per-file failure handling
    pub error_policy: ErrorPolicy,
    /// Glob used when listing a corpus directory
    pub pattern: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            gzipped: true,
            structure: false,
            sentence_tag: SENTENCE_TAG.to_string(),
            error_policy: ErrorPolicy::Abort,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl CorpusConfig {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Walker settings for each file
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            sentence_tag: self.sentence_tag.clone(),
            structure: self.structure,
        }
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: CorpusConfig,
}

impl ConfigBuilder {
    /// Whether files are gzip-compressed
    pub fn gzipped(mut self, gzipped: bool) -> Self {
        self.config.gzipped = gzipped;
        self
    }

    /// Whether to produce structure traces
    pub fn structure(mut self, structure: bool) -> Self {
        self.config.structure = structure;
        self
    }

    /// Set the sentence-level element name
    pub fn sentence_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.sentence_tag = tag.into();
        self
    }

    /// Set the per-file failure policy
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    /// Set the directory listing glob
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<CorpusConfig> {
        let tag = &self.config.sentence_tag;
        if tag.is_empty() || tag.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
            return Err(EngineError::Config(format!("invalid sentence tag '{tag}'")));
        }

        if self.config.pattern.is_empty() {
            return Err(EngineError::Config("empty file pattern".to_string()));
        }
        glob::Pattern::new(&self.config.pattern)?;

        Ok(self.config)
    }
}
