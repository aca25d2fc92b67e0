//! Interface, type alias, and enum extraction
//!
//! Type aliases whose value is a union flatten into a member list; aliases
//! whose value is an object shape are captured as a field list, like
//! interfaces.

use super::{helpers, TypeScriptExtractor};
use crate::extractors::base::{TypeField, TypeKind, TypeSymbol};
use tree_sitter::Node;

/// Extract an interface declaration with its fields.
pub(super) fn extract_interface(extractor: &mut TypeScriptExtractor, node: &Node) -> TypeSymbol {
    let content = extractor.content().to_string();
    let name = declaration_name(&content, node);
    let fields = node
        .child_by_field_name("body")
        .map(|body| extract_fields(&content, &body))
        .unwrap_or_default();

    TypeSymbol {
        name,
        kind: TypeKind::Interface,
        fields,
        values: Vec::new(),
        description: helpers::doc_comment_before(&content, node),
    }
}

/// Extract a type alias declaration.
pub(super) fn extract_type_alias(extractor: &mut TypeScriptExtractor, node: &Node) -> TypeSymbol {
    let content = extractor.content().to_string();
    let name = declaration_name(&content, node);
    let mut fields = Vec::new();
    let mut values = Vec::new();

    if let Some(value) = node.child_by_field_name("value") {
        match value.kind() {
            "union_type" => flatten_union(&content, &value, &mut values),
            "object_type" => fields = extract_fields(&content, &value),
            _ => {}
        }
    }

    TypeSymbol {
        name,
        kind: TypeKind::Type,
        fields,
        values,
        description: helpers::doc_comment_before(&content, node),
    }
}

/// Extract an enum declaration with its member names.
pub(super) fn extract_enum(extractor: &mut TypeScriptExtractor, node: &Node) -> TypeSymbol {
    let content = extractor.content().to_string();
    let name = declaration_name(&content, node);
    let mut values = Vec::new();

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "enum_assignment" => {
                    if let Some(member_name) = member.child_by_field_name("name") {
                        values.push(helpers::node_text(&content, &member_name));
                    }
                }
                "property_identifier" => {
                    values.push(helpers::node_text(&content, &member));
                }
                _ => {}
            }
        }
    }

    TypeSymbol {
        name,
        kind: TypeKind::Enum,
        fields: Vec::new(),
        values,
        description: helpers::doc_comment_before(&content, node),
    }
}

fn declaration_name(content: &str, node: &Node) -> String {
    node.child_by_field_name("name")
        .map(|n| helpers::node_text(content, &n))
        .unwrap_or_else(|| "Anonymous".to_string())
}

/// Property signatures of an interface body or object type.
fn extract_fields(content: &str, body: &Node) -> Vec<TypeField> {
    let mut fields = Vec::new();
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        if member.kind() != "property_signature" {
            continue;
        }
        let Some(name_node) = member.child_by_field_name("name") else {
            continue;
        };
        let name = helpers::node_text(content, &name_node);
        let field_type = helpers::type_annotation_text(content, &member).unwrap_or_default();
        let optional = {
            let mut member_cursor = member.walk();
            let has_optional = member
                .children(&mut member_cursor)
                .any(|c| c.kind() == "?");
            has_optional
        };
        fields.push(TypeField {
            name,
            field_type,
            optional,
        });
    }
    fields
}

/// Union members, flattened through nested unions in source order.
fn flatten_union(content: &str, node: &Node, out: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "union_type" {
            flatten_union(content, &child, out);
        } else {
            out.push(helpers::node_text(content, &child));
        }
    }
}
