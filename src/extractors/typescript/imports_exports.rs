//! Import and export statement extraction
//!
//! Imports record the source specifier and the *local* bound names (the
//! alias when a name is renamed on import). Exports record the outward
//! names, including re-export clauses and default exports.

use super::{helpers, symbols, TypeScriptExtractor};
use crate::extractors::base::ImportRecord;
use tree_sitter::Node;

/// Extract an import statement into `{source, names[]}`.
pub(super) fn extract_import(
    extractor: &mut TypeScriptExtractor,
    node: &Node,
) -> Option<ImportRecord> {
    let content = extractor.content().to_string();
    let source = node
        .child_by_field_name("source")
        .map(|n| unquote(&helpers::node_text(&content, &n)))?;

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "import_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for part in child.named_children(&mut clause_cursor) {
            match part.kind() {
                // Default import: the bound identifier.
                "identifier" => names.push(helpers::node_text(&content, &part)),
                // import * as ns
                "namespace_import" => {
                    let mut ns_cursor = part.walk();
                    let ident = part
                        .named_children(&mut ns_cursor)
                        .find(|c| c.kind() == "identifier");
                    if let Some(ident) = ident {
                        names.push(helpers::node_text(&content, &ident));
                    }
                }
                // import { a, b as c }
                "named_imports" => {
                    let mut spec_cursor = part.walk();
                    for spec in part.named_children(&mut spec_cursor) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let local = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(local) = local {
                            names.push(helpers::node_text(&content, &local));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Some(ImportRecord { source, names })
}

/// Handle an export statement: unwrap attached declarations, record clause
/// and re-export names, and mark default exports.
pub(super) fn extract_export(extractor: &mut TypeScriptExtractor, node: &Node) {
    let content = extractor.content().to_string();

    // export <declaration>  /  export default <declaration>
    if let Some(declaration) = node.child_by_field_name("declaration") {
        let is_default = helpers::has_modifier(node, "default");
        match declaration.kind() {
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration"
            | "interface_declaration"
            | "type_alias_declaration"
            | "enum_declaration"
            | "lexical_declaration"
            | "variable_declaration" => {
                symbols::visit_exported_declaration(extractor, declaration);
            }
            // `export default <expression>` keeps only the default marker.
            _ => {}
        }
        if is_default {
            symbols::push_export(extractor, "default");
        }
        return;
    }

    if helpers::has_modifier(node, "default") {
        symbols::push_export(extractor, "default");
        return;
    }

    // export { a, b as c }  /  export { helper } from "./util"
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "export_clause" {
            continue;
        }
        let mut spec_cursor = child.walk();
        for spec in child.named_children(&mut spec_cursor) {
            if spec.kind() != "export_specifier" {
                continue;
            }
            let outward = spec
                .child_by_field_name("alias")
                .or_else(|| spec.child_by_field_name("name"));
            if let Some(outward) = outward {
                let name = helpers::node_text(&content, &outward);
                symbols::push_export(extractor, &name);
            }
        }
    }
}

fn unquote(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}
