//! Class extraction
//!
//! Handles class declarations with extends/implements heritage, methods,
//! and property fields.

use super::{functions, helpers, TypeScriptExtractor};
use crate::extractors::base::{ClassSymbol, MethodSymbol, PropertySymbol};
use tree_sitter::Node;

/// Extract a class declaration with its heritage and members.
pub(super) fn extract_class(
    extractor: &mut TypeScriptExtractor,
    node: &Node,
    doc_node: &Node,
    exported: bool,
) -> ClassSymbol {
    let content = extractor.content().to_string();
    let name = node
        .child_by_field_name("name")
        .map(|n| helpers::node_text(&content, &n))
        .unwrap_or_else(|| "Anonymous".to_string());

    let (extends, implements) = extract_heritage(&content, node);
    let description = helpers::doc_comment_before(&content, doc_node);

    let mut methods = Vec::new();
    let mut properties = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_definition" | "method_signature" => {
                    methods.push(extract_method(&content, &member));
                }
                "public_field_definition" | "property_definition" | "field_definition" => {
                    let prop_name = member
                        .child_by_field_name("name")
                        .map(|n| helpers::node_text(&content, &n))
                        .unwrap_or_default();
                    if !prop_name.is_empty() {
                        properties.push(PropertySymbol {
                            name: prop_name,
                            prop_type: helpers::type_annotation_text(&content, &member),
                        });
                    }
                }
                _ => {}
            }
        }
    }

    ClassSymbol {
        name,
        methods,
        properties,
        exported,
        line: node.start_position().row as u32 + 1,
        extends,
        implements,
        description,
    }
}

fn extract_method(content: &str, node: &Node) -> MethodSymbol {
    let name = node
        .child_by_field_name("name")
        .map(|n| helpers::node_text(content, &n))
        .unwrap_or_else(|| "anonymous".to_string());
    MethodSymbol {
        name,
        params: functions::extract_params(content, node),
        return_type: helpers::return_type_text(content, node),
        description: helpers::doc_comment_before(content, node),
    }
}

/// Pull base class and implemented interface names from the heritage clause.
///
/// The TypeScript grammar nests `extends_clause` / `implements_clause` under
/// `class_heritage`; the JavaScript grammar puts a bare expression there.
fn extract_heritage(content: &str, node: &Node) -> (Option<String>, Vec<String>) {
    let mut extends = None;
    let mut implements = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "class_heritage" {
            continue;
        }
        let mut heritage_cursor = child.walk();
        let heritage_children: Vec<Node> = child.children(&mut heritage_cursor).collect();
        for clause in heritage_children {
            match clause.kind() {
                "extends_clause" => {
                    let mut clause_cursor = clause.walk();
                    let first = clause.named_children(&mut clause_cursor).next();
                    if let Some(value) = first {
                        extends = Some(base_name(&helpers::node_text(content, &value)));
                    }
                }
                "implements_clause" => {
                    let mut clause_cursor = clause.walk();
                    for ty in clause.named_children(&mut clause_cursor) {
                        implements.push(base_name(&helpers::node_text(content, &ty)));
                    }
                }
                // JavaScript grammar: `class_heritage` directly wraps the
                // superclass expression.
                "identifier" | "member_expression" | "call_expression" => {
                    extends = Some(base_name(&helpers::node_text(content, &clause)));
                }
                _ => {}
            }
        }
    }

    (extends, implements)
}

/// Strip generic arguments from a heritage name (`BaseRepo<User>` → `BaseRepo`).
fn base_name(text: &str) -> String {
    text.split('<').next().unwrap_or(text).trim().to_string()
}
