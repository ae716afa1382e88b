//! Record decoding
//!
//! Data lines with exactly six fields become tokens. Anything else is
//! known corpus corruption and is dropped without failing the sentence.

use crate::types::Token;

/// Decode the fields of a data line into a token
///
/// Returns `None` unless there are exactly six fields. Fields are assigned
/// by position and kept exactly as written in the file, entity references
/// included.
pub fn decode(fields: &[&str]) -> Option<Token> {
    match fields {
        [token, pos, lemma, depid, dephead, deprel] => {
            Some(Token::new(*token, *pos, *lemma, *depid, *dephead, *deprel))
        }
        _ => None,
    }
}
