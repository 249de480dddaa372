//! Front matter and body formatting for generated documents.

use crate::domain::BODY_MARKER;

pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Escape a title for a YAML double-quoted scalar.
pub fn escape_title(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Front matter block with a `title` field, followed by a blank separator line.
///
/// # Examples
/// ```
/// use outline_docs::application::document::front_matter;
///
/// assert_eq!(front_matter(r#"Say "hi""#), "---\ntitle: \"Say \\\"hi\\\"\"\n---\n\n");
/// ```
pub fn front_matter(title: &str) -> String {
    format!(
        "{}\ntitle: \"{}\"\n{}\n\n",
        FRONT_MATTER_DELIMITER,
        escape_title(title),
        FRONT_MATTER_DELIMITER
    )
}

/// Remove every bold marker from a body line.
/// Indentation and other markup are left as written.
pub fn clean_body_line(line: &str) -> String {
    line.replace(BODY_MARKER, "")
}

/// Full document: front matter, then one cleaned line per body line.
pub fn render_document<S: AsRef<str>>(title: &str, body_lines: &[S]) -> String {
    let mut content = front_matter(title);
    for line in body_lines {
        content.push_str(&clean_body_line(line.as_ref()));
        content.push('\n');
    }
    content
}
