//! Sentence extraction from a serialized unit fragment

use crate::classifier::{classify, Line};
use crate::decoder::decode;
use crate::types::{SentenceData, StructureMarker, Token};

/// Default sentence-level element name
pub const SENTENCE_TAG: &str = "s";

/// Turns unit fragments into sentence data
///
/// The fragment is expected to hold one tag per line, with the sentence's
/// own open/close tag lines included; those boundary lines are skipped.
#[derive(Debug, Clone)]
pub struct SentenceExtractor {
    sentence_tag: String,
    want_structure: bool,
}

impl Default for SentenceExtractor {
    fn default() -> Self {
        Self::new(SENTENCE_TAG, false)
    }
}

impl SentenceExtractor {
    /// Create an extractor for the given sentence tag
    pub fn new(sentence_tag: impl Into<String>, want_structure: bool) -> Self {
        Self {
            sentence_tag: sentence_tag.into(),
            want_structure,
        }
    }

    /// Sentence-level element name
    pub fn sentence_tag(&self) -> &str {
        &self.sentence_tag
    }

    /// Whether a structure trace is produced
    pub fn wants_structure(&self) -> bool {
        self.want_structure
    }

    /// Extract tokens (and optionally the structure trace) from a fragment
    pub fn extract(&self, unit_text: &str) -> SentenceData {
        self.extract_counting(unit_text).0
    }

    /// Like [`extract`](Self::extract), also returning the number of data
    /// lines that were dropped by the decoder
    pub fn extract_counting(&self, unit_text: &str) -> (SentenceData, usize) {
        if self.want_structure {
            self.extract_structured(unit_text)
        } else {
            self.extract_tokens(unit_text)
        }
    }

    fn extract_tokens(&self, unit_text: &str) -> (SentenceData, usize) {
        let mut tokens = Vec::new();
        let mut dropped = 0;

        for line in unit_text.split('\n') {
            if let Line::Data(fields) = classify(line) {
                match decode(&fields) {
                    Some(token) => tokens.push(token),
                    None => dropped += 1,
                }
            }
        }

        (SentenceData::Tokens(tokens), dropped)
    }

    fn extract_structured(&self, unit_text: &str) -> (SentenceData, usize) {
        let mut structure = Vec::new();
        let mut tokens: Vec<Token> = Vec::new();
        let mut dropped = 0;

        for line in unit_text.split('\n') {
            match classify(line) {
                Line::Blank => {}
                tag if tag.is_tag(&self.sentence_tag) => {}
                Line::Close(name) => structure.push(StructureMarker::Close(name.to_string())),
                Line::Open(name) => structure.push(StructureMarker::Open(name.to_string())),
                Line::Data(fields) => match decode(&fields) {
                    Some(token) => {
                        structure.push(StructureMarker::Token(token.pos.clone()));
                        tokens.push(token);
                    }
                    None => dropped += 1,
                },
            }
        }

        (SentenceData::Structured { structure, tokens }, dropped)
    }
}

/// Extract a fragment with the default sentence tag
pub fn extract(unit_text: &str, want_structure: bool) -> SentenceData {
    SentenceExtractor::new(SENTENCE_TAG, want_structure).extract(unit_text)
}
