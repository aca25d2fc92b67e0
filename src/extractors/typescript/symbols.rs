//! Top-level declaration walk and symbol routing
//!
//! Walks the program's direct children and routes each declaration to the
//! module that knows its shape. Export statements unwrap to their inner
//! declaration with the exported flag set.

use super::{classes, functions, helpers, imports_exports, interfaces, TypeScriptExtractor};
use tree_sitter::{Node, Tree};

/// Extract all symbols from the parsed file into the extractor's record.
pub(super) fn extract_symbols(extractor: &mut TypeScriptExtractor, tree: &Tree) {
    let root = tree.root_node();

    attach_file_description(extractor, &root);

    let mut cursor = root.walk();
    let children: Vec<Node> = root.named_children(&mut cursor).collect();
    for node in children {
        visit_statement(extractor, node, false);
    }
}

/// Route one top-level statement. `exported` is set when the statement was
/// unwrapped from an `export` form.
fn visit_statement(extractor: &mut TypeScriptExtractor, node: Node, exported: bool) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            let function = functions::extract_function(extractor, &node, &node, exported);
            let name = function.name.clone();
            extractor.record_mut().functions.push(function);
            functions::extract_nested_functions(extractor, &node, &name);
            if exported {
                push_export(extractor, &name);
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            let class = classes::extract_class(extractor, &node, &node, exported);
            let name = class.name.clone();
            extractor.record_mut().classes.push(class);
            if exported {
                push_export(extractor, &name);
            }
        }
        "interface_declaration" => {
            let symbol = interfaces::extract_interface(extractor, &node);
            finish_type(extractor, symbol, exported);
        }
        "type_alias_declaration" => {
            let symbol = interfaces::extract_type_alias(extractor, &node);
            finish_type(extractor, symbol, exported);
        }
        "enum_declaration" => {
            let symbol = interfaces::extract_enum(extractor, &node);
            finish_type(extractor, symbol, exported);
        }
        "lexical_declaration" | "variable_declaration" => {
            functions::extract_variable_statement(extractor, &node, exported);
        }
        "import_statement" => {
            if let Some(import) = imports_exports::extract_import(extractor, &node) {
                extractor.record_mut().imports.push(import);
            }
        }
        "export_statement" => {
            imports_exports::extract_export(extractor, &node);
        }
        _ => {}
    }
}

/// Export statements delegate back here for their inner declaration.
pub(super) fn visit_exported_declaration(extractor: &mut TypeScriptExtractor, node: Node) {
    visit_statement(extractor, node, true);
}

pub(super) fn push_export(extractor: &mut TypeScriptExtractor, name: &str) {
    let exports = &mut extractor.record_mut().exports;
    if !exports.iter().any(|e| e == name) {
        exports.push(name.to_string());
    }
}

fn finish_type(
    extractor: &mut TypeScriptExtractor,
    symbol: crate::extractors::base::TypeSymbol,
    exported: bool,
) {
    let name = symbol.name.clone();
    extractor.record_mut().types.push(symbol);
    if exported {
        push_export(extractor, &name);
    }
}

/// The first comment near the top of the file becomes the file description.
fn attach_file_description(extractor: &mut TypeScriptExtractor, root: &Node) {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "comment" {
            if child.start_position().row <= 2 {
                let cleaned = helpers::clean_comment(&helpers::node_text(extractor.content(), &child));
                if !cleaned.is_empty() {
                    extractor.record_mut().description = Some(cleaned);
                }
            }
            return;
        }
        // Stop at the first non-comment node: a later comment belongs to a
        // declaration, not the file.
        if child.is_named() {
            return;
        }
    }
}
