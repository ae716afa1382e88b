//! Vertical output formatter

use super::OutputFormatter;
use anyhow::Result;
use cowstream_engine::SentenceRecord;
use std::io::Write;

/// Vertical formatter - metadata comments, then one token per line
///
/// Sentences are separated by a blank line.
pub struct VerticalFormatter<W: Write> {
    writer: W,
}

impl<W: Write> VerticalFormatter<W> {
    /// Create a new vertical formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for VerticalFormatter<W> {
    fn format_sentence(&mut self, record: &SentenceRecord) -> Result<()> {
        for (key, value) in &record.metadata {
            writeln!(self.writer, "# {key} = {value}")?;
        }
        for token in record.tokens() {
            writeln!(self.writer, "{token}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
