//! Frontmatter parsing for markdown documents.
//!
//! A document may start with a YAML block fenced by lines of exactly
//! `---`. Anything that does not look like a complete block is
//! treated as plain text, and a block that fails to decode degrades
//! to "no metadata" rather than an error.

use crate::core::types::{BuildOutcome, Metadata};

/// Fence line opening and closing a metadata block
pub const DELIMITER: &str = "---";

/// A document split into its metadata block and body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub metadata: Option<Metadata>,
    pub body: String,
}

impl ParsedDocument {
    fn plain(text: &str) -> Self {
        Self {
            metadata: None,
            body: text.to_string(),
        }
    }
}

/// Split `text` into metadata and body
///
/// Returns the text unchanged (and no metadata) when it has no
/// opening fence, no closing fence, or a block that is not a valid
/// YAML mapping. The last case is reported as `Degraded`.
pub fn parse(text: &str) -> BuildOutcome<ParsedDocument> {
    if !text.starts_with(DELIMITER) {
        return BuildOutcome::Complete(ParsedDocument::plain(text));
    }

    let mut lines = text.split_inclusive('\n');
    let opening = match lines.next() {
        Some(line) if is_delimiter_line(line) => line,
        _ => return BuildOutcome::Complete(ParsedDocument::plain(text)),
    };

    let block_start = opening.len();
    let mut offset = block_start;

    for line in lines {
        if is_delimiter_line(line) {
            let block = &text[block_start..offset];
            let rest = &text[offset + line.len()..];
            return decode(block, rest, text);
        }
        offset += line.len();
    }

    // Unterminated block: plain text, not an error
    BuildOutcome::Complete(ParsedDocument::plain(text))
}

fn decode(block: &str, rest: &str, original: &str) -> BuildOutcome<ParsedDocument> {
    let metadata = if block.trim().is_empty() {
        Metadata::new()
    } else {
        match serde_yaml::from_str::<Metadata>(block) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Ignoring malformed frontmatter: {}", e);
                return BuildOutcome::Degraded {
                    value: ParsedDocument::plain(original),
                    reasons: vec![format!("malformed frontmatter: {e}")],
                };
            }
        }
    };

    BuildOutcome::Complete(ParsedDocument {
        metadata: Some(metadata),
        body: trim_blank_lines(rest),
    })
}

fn is_delimiter_line(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Drop whitespace-only lines from both ends
pub(crate) fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |end| end);

    lines[start..=end].join("\n")
}
