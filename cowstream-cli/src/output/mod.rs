//! Output formatting module

use anyhow::Result;
use cowstream_engine::SentenceRecord;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single sentence record
    fn format_sentence(&mut self, record: &SentenceRecord) -> Result<()>;

    /// Finalize output (e.g., flush buffered writers)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;
pub mod vertical;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use vertical::VerticalFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One sentence per line, surface forms separated by spaces
    Text,
    /// One JSON object per sentence (JSON lines)
    Json,
    /// One token per line with metadata comments
    Vertical,
}

impl OutputFormat {
    /// Create the formatter for this format
    pub fn formatter<W: Write + Send + Sync + 'static>(self, writer: W) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Vertical => Box::new(VerticalFormatter::new(writer)),
        }
    }
}
