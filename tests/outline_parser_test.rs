//! Tests for OutlineParser
//!
//! Nesting rule: the parent of a structural line is the nearest preceding
//! structural line with strictly smaller indentation (or the root).

use rstest::rstest;

use outline_docs::domain::{DomainError, Outline, OutlineParser};

fn parse(text: &str) -> Outline {
    OutlineParser::new(20).parse(text).unwrap()
}

/// Line number of each node's parent (0 for the root), in source order.
fn parent_lines(outline: &Outline) -> Vec<(usize, usize)> {
    outline
        .iter()
        .map(|(_, node)| {
            let parent = node
                .parent
                .and_then(|idx| outline.get_node(idx))
                .map_or(0, |parent| parent.data.line_number);
            (node.data.line_number, parent)
        })
        .collect()
}

#[test]
fn given_structural_lines_when_parsing_then_parent_is_nearest_shallower_line() {
    // Arrange
    let text = "\
A
  B
    C
  D
E
 F
   G
  H
";

    // Act
    let outline = parse(text);

    // Assert
    assert_eq!(outline.len(), 8);
    let expected: Vec<(usize, usize)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let indent = line.len() - line.trim_start().len();
            let parent = text
                .lines()
                .take(i)
                .enumerate()
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .find(|(_, prev)| prev.len() - prev.trim_start().len() < indent)
                .map_or(0, |(j, _)| j + 1);
            (i + 1, parent)
        })
        .collect();
    assert_eq!(parent_lines(&outline), expected);
    assert_eq!(
        parent_lines(&outline),
        vec![(1, 0), (2, 1), (3, 2), (4, 1), (5, 0), (6, 5), (7, 6), (8, 6)]
    );
}

#[test]
fn given_body_lines_when_parsing_then_attached_to_open_node() {
    // Arrange
    let text = "Guide\n  Intro\n    **first**\n  **second, less indented**\n  Advanced\n";

    // Act
    let outline = parse(text);

    // Assert
    assert_eq!(outline.len(), 3);
    let nodes: Vec<_> = outline.iter().map(|(_, node)| node).collect();
    assert!(nodes[0].body_lines.is_empty());
    assert_eq!(
        nodes[1].body_lines,
        vec!["    **first**", "  **second, less indented**"]
    );
    assert!(nodes[2].body_lines.is_empty());
}

#[test]
fn given_blank_and_marker_only_lines_when_parsing_then_they_are_skipped() {
    // Act
    let outline = parse("Guide\n\n   \n  -\n  Intro\n");

    // Assert
    assert_eq!(outline.len(), 2);
    assert_eq!(outline.depth(), 2);
}

#[rstest]
#[case("**orphan**\nGuide\n", 1)]
#[case("\n\n  **late orphan**\n", 3)]
fn given_body_line_before_structure_when_parsing_then_malformed(
    #[case] text: &str,
    #[case] line: usize,
) {
    let result = OutlineParser::new(20).parse(text);

    match result {
        Err(DomainError::MalformedOutline { line: got, .. }) => assert_eq!(got, line),
        other => panic!("expected MalformedOutline, got {:?}", other.map(|o| o.len())),
    }
}

#[test]
fn given_identical_labels_on_different_lines_when_parsing_then_ids_differ() {
    let outline = parse("Notes\nNotes\n");

    let ids: Vec<_> = outline.iter().map(|(_, n)| n.data.id.clone()).collect();

    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn given_label_with_list_marker_when_parsing_then_content_is_clean_and_title_raw() {
    let outline = parse("- Getting started\n");

    let (_, node) = outline.iter().next().unwrap();

    assert_eq!(node.data.content, "Getting started");
    assert_eq!(node.data.title(), "- Getting started");
}

#[test]
fn given_outline_when_rendering_tree_then_labels_are_nested() {
    let outline = parse("Guide\n  Intro\n  Advanced\n");

    let rendered = outline.to_tree("outline.txt").to_string();

    assert!(rendered.starts_with("outline.txt\n"));
    assert!(rendered.contains("Guide"));
    assert!(rendered.contains("Intro"));
    assert_eq!(rendered.lines().count(), 4);
}
