//! Function extraction
//!
//! Handles function declarations, function-valued variable declarations
//! (arrow functions and function expressions), observed call sites, one
//! level of nested functions, and the UI-component heuristic.

use super::{helpers, TypeScriptExtractor};
use crate::extractors::base::{FunctionSymbol, Param, VariableSymbol};
use tree_sitter::Node;

/// Type names that mark a function-valued binding as a UI component.
const COMPONENT_TYPE_NAMES: &[&str] = &["FC", "FunctionComponent", "Component", "ComponentType"];

/// Extract a named function declaration.
///
/// `decl_node` carries the signature and body; `doc_node` is where the doc
/// comment lookup anchors (they differ for function-valued variables, where
/// the comment precedes the whole statement).
pub(super) fn extract_function(
    extractor: &mut TypeScriptExtractor,
    decl_node: &Node,
    doc_node: &Node,
    exported: bool,
) -> FunctionSymbol {
    let content = extractor.content().to_string();
    let name = decl_node
        .child_by_field_name("name")
        .map(|n| helpers::node_text(&content, &n))
        .unwrap_or_else(|| "anonymous".to_string());

    build_function(
        extractor,
        name,
        decl_node,
        decl_node,
        doc_node,
        None,
        exported,
    )
}

/// Extract the declarators of a `const`/`let`/`var` statement. Function
/// values become function symbols; everything else becomes a variable.
pub(super) fn extract_variable_statement(
    extractor: &mut TypeScriptExtractor,
    node: &Node,
    exported: bool,
) {
    let content = extractor.content().to_string();
    let keyword = node
        .child(0)
        .map(|n| helpers::node_text(&content, &n))
        .unwrap_or_else(|| "const".to_string());

    let mut cursor = node.walk();
    let declarators: Vec<Node> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "variable_declarator")
        .collect();

    for declarator in declarators {
        let name = declarator
            .child_by_field_name("name")
            .map(|n| helpers::node_text(&content, &n))
            .unwrap_or_else(|| "anonymous".to_string());

        let value = declarator.child_by_field_name("value");
        let is_function_value = value
            .map(|v| {
                matches!(
                    v.kind(),
                    "arrow_function" | "function_expression" | "function"
                )
            })
            .unwrap_or(false);

        if is_function_value {
            let value = value.unwrap();
            let annotation = helpers::type_annotation_text(&content, &declarator);
            let function = build_function(
                extractor,
                name.clone(),
                &value,
                &declarator,
                node,
                annotation,
                exported,
            );
            extractor.record_mut().functions.push(function);
            extract_nested_functions(extractor, &value, &name);
        } else {
            extractor.record_mut().variables.push(VariableSymbol {
                name: name.clone(),
                kind: keyword.clone(),
                line: declarator.start_position().row as u32 + 1,
                exported,
            });
        }

        if exported {
            super::symbols::push_export(extractor, &name);
        }
    }
}

/// Capture one level of named functions nested in a function body.
///
/// Nested symbols are named `parent.child`; deeper nesting is not walked.
pub(super) fn extract_nested_functions(
    extractor: &mut TypeScriptExtractor,
    fn_node: &Node,
    parent_name: &str,
) {
    let content = extractor.content().to_string();
    let Some(body) = fn_node.child_by_field_name("body") else {
        return;
    };
    if body.kind() != "statement_block" {
        return;
    }

    let mut cursor = body.walk();
    let statements: Vec<Node> = body.named_children(&mut cursor).collect();
    for statement in statements {
        match statement.kind() {
            "function_declaration" | "generator_function_declaration" => {
                let mut function =
                    extract_function(extractor, &statement, &statement, false);
                function.name = format!("{}.{}", parent_name, function.name);
                extractor.record_mut().functions.push(function);
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = statement.walk();
                let declarators: Vec<Node> = statement
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() == "variable_declarator")
                    .collect();
                for declarator in declarators {
                    let Some(value) = declarator.child_by_field_name("value") else {
                        continue;
                    };
                    if !matches!(
                        value.kind(),
                        "arrow_function" | "function_expression" | "function"
                    ) {
                        continue;
                    }
                    let name = declarator
                        .child_by_field_name("name")
                        .map(|n| helpers::node_text(&content, &n))
                        .unwrap_or_else(|| "anonymous".to_string());
                    let mut function = build_function(
                        extractor,
                        format!("{}.{}", parent_name, name),
                        &value,
                        &declarator,
                        &statement,
                        None,
                        false,
                    );
                    function.line = declarator.start_position().row as u32 + 1;
                    extractor.record_mut().functions.push(function);
                }
            }
            _ => {}
        }
    }
}

/// Assemble a FunctionSymbol from its signature-bearing node.
fn build_function(
    extractor: &mut TypeScriptExtractor,
    name: String,
    sig_node: &Node,
    line_node: &Node,
    doc_node: &Node,
    annotation: Option<String>,
    exported: bool,
) -> FunctionSymbol {
    let content = extractor.content().to_string();
    let params = extract_params(&content, sig_node);
    let return_type = helpers::return_type_text(&content, sig_node);
    let is_async = helpers::has_modifier(sig_node, "async");
    let description = helpers::doc_comment_before(&content, doc_node);

    let is_component = annotation
        .as_deref()
        .map(annotation_is_component)
        .unwrap_or(false)
        || body_returns_markup(sig_node);

    let call_sites = sig_node
        .child_by_field_name("body")
        .map(|body| collect_call_sites(&content, &body))
        .unwrap_or_default();

    FunctionSymbol {
        name,
        params,
        return_type,
        exported,
        line: line_node.start_position().row as u32 + 1,
        description,
        is_async,
        is_component,
        call_sites,
    }
}

/// Extract parameters with their declared types, when annotated.
pub(super) fn extract_params(content: &str, node: &Node) -> Vec<Param> {
    let Some(params_node) = node.child_by_field_name("parameters") else {
        // Arrow functions with a single bare parameter: `x => x + 1`.
        if let Some(param) = node.child_by_field_name("parameter") {
            return vec![Param {
                name: helpers::node_text(content, &param),
                param_type: None,
            }];
        }
        return Vec::new();
    };

    let mut params = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.named_children(&mut cursor) {
        match child.kind() {
            "required_parameter" | "optional_parameter" => {
                let name = child
                    .child_by_field_name("pattern")
                    .map(|p| helpers::node_text(content, &p))
                    .unwrap_or_else(|| helpers::node_text(content, &child));
                let param_type = helpers::type_annotation_text(content, &child);
                params.push(Param { name, param_type });
            }
            "identifier" => {
                params.push(Param {
                    name: helpers::node_text(content, &child),
                    param_type: None,
                });
            }
            "rest_parameter" | "object_pattern" | "array_pattern" => {
                params.push(Param {
                    name: helpers::node_text(content, &child),
                    param_type: None,
                });
            }
            _ => {}
        }
    }
    params
}

/// Does the annotation name a component-shaped type (`React.FC<...>` etc.)?
fn annotation_is_component(annotation: &str) -> bool {
    let head = annotation.split('<').next().unwrap_or("").trim();
    let last = head.rsplit('.').next().unwrap_or("");
    COMPONENT_TYPE_NAMES.contains(&last)
}

/// Does the function body return templated markup? A heuristic: an arrow
/// expression body that is markup, or any return statement carrying markup.
fn body_returns_markup(fn_node: &Node) -> bool {
    let Some(body) = fn_node.child_by_field_name("body") else {
        return false;
    };
    // Arrow expression body: `() => <div/>` or `() => (<div/>)`.
    if body.kind() != "statement_block" {
        return subtree_has_markup(&body);
    }
    let mut found = false;
    walk(&body, &mut |node| {
        if node.kind() == "return_statement" && subtree_has_markup(node) {
            found = true;
        }
    });
    found
}

fn subtree_has_markup(node: &Node) -> bool {
    let mut found = false;
    walk(node, &mut |n| {
        if matches!(
            n.kind(),
            "jsx_element" | "jsx_self_closing_element" | "jsx_fragment"
        ) {
            found = true;
        }
    });
    found
}

/// Collect textual callee names from every call expression in the body,
/// deduplicated in first-seen order.
pub(super) fn collect_call_sites(content: &str, body: &Node) -> Vec<String> {
    let mut sites: Vec<String> = Vec::new();
    walk(body, &mut |node| {
        if node.kind() != "call_expression" {
            return;
        }
        let Some(callee) = node.child_by_field_name("function") else {
            return;
        };
        if matches!(callee.kind(), "identifier" | "member_expression") {
            let text = helpers::node_text(content, &callee);
            if !text.is_empty() && !sites.iter().any(|s| *s == text) {
                sites.push(text);
            }
        }
    });
    sites
}

/// Depth-first walk over every descendant of `node`, inclusive.
fn walk(node: &Node, visit: &mut impl FnMut(&Node)) {
    visit(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, visit);
    }
}
