//! Sentence extraction for COW corpus fragments
//!
//! COW files are pseudo-XML: sentence elements (`<s ...>`) wrap one token per
//! line, each token a tab-separated record of six fields. This crate holds the
//! I/O-free part of reading them:
//!
//! - [`classifier`]: tells tag lines from data lines
//! - [`decoder`]: turns six-field data lines into [`Token`]s, dropping the rest
//! - [`extractor`]: turns one serialized sentence fragment into [`SentenceData`]
//!
//! # Example
//!
//! ```rust
//! use cowstream_core::{extract, Token};
//!
//! let fragment = "<s id=\"1\">\n<w>\ncat\tNN\tcat\t1\t0\troot\n</w>\n</s>";
//! let data = extract(fragment, true);
//!
//! let labels: Vec<String> = data.structure().unwrap().iter().map(|m| m.label()).collect();
//! assert_eq!(labels, ["w_open", "NN", "w_close"]);
//! assert_eq!(data.tokens(), &[Token::new("cat", "NN", "cat", "1", "0", "root")]);
//! ```

#![warn(missing_docs)]

pub mod classifier;
pub mod decoder;
pub mod extractor;
pub mod types;

pub use classifier::{classify, Fields, Line};
pub use decoder::decode;
pub use extractor::{extract, SentenceExtractor, SENTENCE_TAG};
pub use types::{
    Metadata, SentenceData, SentenceRecord, StructureMarker, Token, TokenColumns, TOKEN_FIELDS,
};

/// Transpose tokens into one column per field
pub fn separate(tokens: &[Token]) -> TokenColumns {
    TokenColumns::from_tokens(tokens)
}
