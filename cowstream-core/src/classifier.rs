//! Line classification
//!
//! A unit fragment mixes markup lines with tab-separated token records. Each
//! line is one of: an opening tag, a closing tag, a data record or blank.
//! No arity check happens here; that is the decoder's job.

use smallvec::SmallVec;

/// Fields of a data line; inline storage covers well-formed token lines
pub type Fields<'a> = SmallVec<[&'a str; 6]>;

/// Classification of one fragment line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `<name ...>`
    Open(&'a str),
    /// `</name>`
    Close(&'a str),
    /// Any other non-empty line, split on tabs
    Data(Fields<'a>),
    /// Empty line
    Blank,
}

impl<'a> Line<'a> {
    /// Element name for tag lines
    pub fn tag_name(&self) -> Option<&'a str> {
        match self {
            Line::Open(name) | Line::Close(name) => Some(name),
            _ => None,
        }
    }

    /// True when this is an open or close tag for `name`
    pub fn is_tag(&self, name: &str) -> bool {
        self.tag_name() == Some(name)
    }
}

/// Classify a single line
///
/// A trailing carriage return is ignored so CRLF input behaves like LF input.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(rest) = line.strip_prefix("</") {
        return Line::Close(tag_name(rest));
    }

    if let Some(rest) = line.strip_prefix('<') {
        return Line::Open(tag_name(rest));
    }

    Line::Data(line.split('\t').collect())
}

/// Element name at the start of a tag body: up to whitespace, `/` or `>`
fn tag_name(body: &str) -> &str {
    let end = body
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(body.len());
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_tag() {
        assert_eq!(classify("<p>"), Line::Open("p"));
        assert_eq!(classify("<s id=\"1\" doc=\"a\">"), Line::Open("s"));
        assert_eq!(classify("<title\tlang=\"de\">"), Line::Open("title"));
    }

    #[test]
    fn test_close_tag() {
        assert_eq!(classify("</p>"), Line::Close("p"));
        assert_eq!(classify("</s>"), Line::Close("s"));
    }

    #[test]
    fn test_self_closing_name() {
        assert_eq!(classify("<br/>"), Line::Open("br"));
    }

    #[test]
    fn test_blank() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("\r"), Line::Blank);
    }

    #[test]
    fn test_data_line_split() {
        match classify("cat\tNN\tcat\t1\t0\troot") {
            Line::Data(fields) => {
                assert_eq!(fields.as_slice(), &["cat", "NN", "cat", "1", "0", "root"]);
                assert!(!fields.spilled());
            }
            other => panic!("expected data line, got {other:?}"),
        }
    }

    #[test]
    fn test_data_line_no_arity_check() {
        match classify("foo\tbar") {
            Line::Data(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected data line, got {other:?}"),
        }
    }

    #[test]
    fn test_crlf_stripped() {
        match classify("a\tb\r") {
            Line::Data(fields) => assert_eq!(fields.as_slice(), &["a", "b"]),
            other => panic!("expected data line, got {other:?}"),
        }
    }

    #[test]
    fn test_is_tag() {
        assert!(classify("<s n=\"2\">").is_tag("s"));
        assert!(classify("</s>").is_tag("s"));
        assert!(!classify("<section>").is_tag("s"));
        assert!(!classify("s\tNN").is_tag("s"));
    }
}
