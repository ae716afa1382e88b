//! Extract command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::resolve_inputs;
use crate::output::{OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cowstream_engine::{Corpus, CorpusConfig, CorpusStats, ErrorPolicy};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files, patterns (supports glob) or corpus directories
    #[arg(short, long, value_name = "FILE/PATTERN/DIR", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Inputs are uncompressed
    #[arg(long)]
    pub plain: bool,

    /// Inputs are gzip-compressed, overriding the config file
    #[arg(long, conflicts_with = "plain")]
    pub gzip: bool,

    /// Include the structure trace of each sentence
    #[arg(long)]
    pub structure: bool,

    /// Sentence-level element name
    #[arg(long, value_name = "NAME")]
    pub tag: Option<String>,

    /// Skip files that fail instead of stopping
    #[arg(long)]
    pub skip_errors: bool,

    /// Stop at the first failing file, overriding the config file
    #[arg(long, conflicts_with = "skip_errors")]
    pub no_skip_errors: bool,

    /// Glob used to list directory inputs
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging()?;

        log::info!("Starting sentence extraction");
        log::debug!("Arguments: {:?}", self);

        let file_config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let corpus_config = self.corpus_config(&file_config)?;
        let format = self.output_format(&file_config)?;

        let files = resolve_inputs(&self.input, &corpus_config.pattern)?;
        log::info!("Found {} file(s) to process", files.len());

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };
        let mut formatter = format.formatter(writer);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let mut corpus = Corpus::new(files, &corpus_config);
        if let Err(err) = stream(&mut corpus, formatter.as_mut(), &progress) {
            progress.abandon();
            return Err(err);
        }
        formatter.finish()?;
        progress.finish();

        log_summary(&corpus.stats());
        Ok(())
    }

    /// Merge command-line flags over the config file
    pub fn corpus_config(&self, file_config: &CliConfig) -> Result<CorpusConfig> {
        let section = &file_config.corpus;
        let gzipped = self.gzip || (section.gzipped && !self.plain);

        let default_pattern = if gzipped { "*.xml.gz" } else { "*.xml" };
        let pattern = self
            .pattern
            .clone()
            .or_else(|| section.pattern.clone())
            .unwrap_or_else(|| default_pattern.to_string());

        let error_policy = if self.skip_errors || (section.skip_errors && !self.no_skip_errors) {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        };

        CorpusConfig::builder()
            .gzipped(gzipped)
            .structure(self.structure || section.structure)
            .sentence_tag(self.tag.as_deref().unwrap_or(&section.sentence_tag))
            .error_policy(error_policy)
            .pattern(pattern)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Output format from the flag, else the config file
    pub fn output_format(&self, file_config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        let name = &file_config.output.default_format;
        OutputFormat::from_str(name, true).map_err(|_| {
            CliError::ConfigError(format!("unknown output format '{name}'")).into()
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .context("Failed to initialize logging")?;
        }

        Ok(())
    }
}

/// Write every record of the corpus
fn stream(
    corpus: &mut Corpus,
    formatter: &mut dyn OutputFormatter,
    progress: &ProgressReporter,
) -> Result<()> {
    while let Some(record) = corpus.next() {
        let record = record.map_err(|e| CliError::ExtractionError(e.to_string()))?;
        formatter.format_sentence(&record)?;

        let stats = corpus.stats();
        progress.update(
            (stats.files_processed + stats.files_skipped) as u64,
            corpus.current_file(),
        );
    }
    Ok(())
}

fn log_summary(stats: &CorpusStats) {
    log::info!(
        "Extracted {} sentence(s) with {} token(s) from {} file(s)",
        stats.walk.sentences,
        stats.walk.tokens,
        stats.files_processed
    );
    if stats.files_skipped > 0 {
        log::warn!("{} file(s) skipped after errors", stats.files_skipped);
    }
    if stats.walk.dropped_records > 0 {
        log::info!(
            "{} malformed token line(s) dropped",
            stats.walk.dropped_records
        );
    }
    log::debug!("Peak live element nodes: {}", stats.walk.peak_live_nodes);
}
