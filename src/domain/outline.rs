//! Outline parser: indented plain text to an [`Outline`] tree.
//!
//! Every non-blank line is either
//! - a **body line**, if it contains `**` anywhere: attached to the node on
//!   top of the open-node stack, or
//! - a **structural line**: its indentation decides its parent. The stack is
//!   popped while the top is indented at least as deep as the new line, so
//!   equal indentation means "sibling", never "child".

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, Outline};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identity::node_id;
use crate::domain::sanitize::{sanitize, SanitizePolicy};

/// Substring that marks a line as body text.
pub const BODY_MARKER: &str = "**";

/// Builds outline trees from raw lines.
#[derive(Debug, Clone)]
pub struct OutlineParser {
    max_name_length: usize,
}

impl OutlineParser {
    /// `max_name_length` bounds the structural labels, as for file names.
    pub fn new(max_name_length: usize) -> Self {
        Self { max_name_length }
    }

    /// Parse outline text. See [`OutlineParser::parse_lines`].
    pub fn parse(&self, text: &str) -> DomainResult<Outline> {
        self.parse_lines(text.lines())
    }

    /// Parse lines (numbered from 1) into a tree.
    ///
    /// # Errors
    /// [`DomainError::MalformedOutline`] when a body line appears before any
    /// structural line. No partial tree is returned.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_lines<I, S>(&self, lines: I) -> DomainResult<Outline>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outline = Outline::new();
        let mut stack: Vec<(Index, usize)> = Vec::new();

        for (offset, line) in lines.into_iter().enumerate() {
            let line_number = offset + 1;
            let raw_line = line.as_ref().trim_end();
            let content = sanitize(raw_line, self.max_name_length, SanitizePolicy::Default);
            let content = content.trim();
            if content.is_empty() {
                continue;
            }

            if raw_line.contains(BODY_MARKER) {
                let (top, _) = stack.last().ok_or_else(|| DomainError::MalformedOutline {
                    line: line_number,
                    content: raw_line.to_string(),
                })?;
                outline.push_body_line(*top, raw_line.to_string());
                continue;
            }

            let indent = indent_level(raw_line);
            while matches!(stack.last(), Some((_, top_indent)) if *top_indent >= indent) {
                stack.pop();
            }
            let parent = stack.last().map_or(outline.root(), |(idx, _)| *idx);

            let data = NodeData {
                id: node_id(indent, content, line_number),
                indent,
                content: content.to_string(),
                raw_line: raw_line.to_string(),
                line_number,
            };
            debug!("line {}: indent={} content={:?}", line_number, indent, data.content);
            let idx = outline.insert_node(data, parent);
            stack.push((idx, indent));
        }

        debug!("parsed {} structural nodes", outline.len());
        Ok(outline)
    }
}

/// Count of leading whitespace characters.
pub fn indent_level(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_level_counts_leading_whitespace() {
        assert_eq!(indent_level("Guide"), 0);
        assert_eq!(indent_level("    Intro"), 4);
        assert_eq!(indent_level("\t\tTabbed"), 2);
    }

    #[test]
    fn test_body_marker_before_structure_is_malformed() {
        let result = OutlineParser::new(20).parse("**orphan**\nGuide");
        match result {
            Err(DomainError::MalformedOutline { line, content }) => {
                assert_eq!(line, 1);
                assert_eq!(content, "**orphan**");
            }
            other => panic!("expected MalformedOutline, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_indent_is_sibling() {
        let outline = OutlineParser::new(20).parse("A\nB\nC").unwrap();
        assert_eq!(outline.children(outline.root()).count(), 3);
        assert_eq!(outline.depth(), 1);
    }
}
