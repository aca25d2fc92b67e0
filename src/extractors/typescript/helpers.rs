//! Utility functions for tree traversal and text extraction

use tree_sitter::Node;

/// Get the source text for a node, UTF-8 safe.
pub(super) fn node_text(content: &str, node: &Node) -> String {
    let bytes = content.as_bytes();
    let start = node.start_byte();
    let end = node.end_byte();
    if start < bytes.len() && end <= bytes.len() {
        String::from_utf8_lossy(&bytes[start..end]).to_string()
    } else {
        String::new()
    }
}

/// Strip comment markers and normalize a doc comment into plain text.
pub(super) fn clean_comment(raw: &str) -> String {
    let mut lines = Vec::new();
    for line in raw.lines() {
        let mut text = line.trim();
        text = text.strip_prefix("/**").unwrap_or(text);
        text = text.strip_suffix("*/").unwrap_or(text);
        text = text.strip_prefix("/*").unwrap_or(text);
        text = text.strip_prefix("///").unwrap_or(text);
        text = text.strip_prefix("//").unwrap_or(text);
        text = text.strip_prefix('*').unwrap_or(text);
        let text = text.trim();
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }
    lines.join("\n")
}

/// Find a documentation comment immediately preceding `node`.
///
/// The comment must end on the line directly above the declaration; a blank
/// line in between breaks attachment. Runs of contiguous `//` lines collapse
/// into one description.
pub(super) fn doc_comment_before(content: &str, node: &Node) -> Option<String> {
    // Exported declarations sit inside an export_statement; the comment
    // precedes the export form, not the inner declaration.
    let anchor = match node.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => *node,
    };

    let mut comments: Vec<String> = Vec::new();
    let mut expected_row = anchor.start_position().row;
    let mut current = anchor.prev_sibling();

    while let Some(sibling) = current {
        if sibling.kind() != "comment" {
            break;
        }
        // No blank line allowed between the comment and what follows it.
        if sibling.end_position().row + 1 != expected_row {
            break;
        }
        comments.push(node_text(content, &sibling));
        expected_row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();
    let cleaned = clean_comment(&comments.join("\n"));
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Check whether a node carries a modifier token (e.g. `async`).
pub(super) fn has_modifier(node: &Node, modifier: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == modifier {
            return true;
        }
    }
    false
}

/// Text of a type annotation with the leading `:` stripped.
pub(super) fn type_annotation_text(content: &str, node: &Node) -> Option<String> {
    let annotation = node.child_by_field_name("type")?;
    let text = node_text(content, &annotation);
    let stripped = text.trim_start_matches(':').trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Text of a function's return type annotation, `:` stripped.
pub(super) fn return_type_text(content: &str, node: &Node) -> Option<String> {
    let annotation = node.child_by_field_name("return_type")?;
    let text = node_text(content, &annotation);
    let stripped = text.trim_start_matches(':').trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
