//! Go-family heuristic extractor
//!
//! Line-oriented scan for brace-scoped `func` / `type` declarations. A
//! receiver clause attaches a method to an already- or newly-created struct
//! symbol. Exported means the name starts with an uppercase letter.

use crate::extractors::base::{
    ClassSymbol, FileSymbolRecord, FunctionSymbol, ImportRecord, MethodSymbol, Param,
    PropertySymbol, TypeField, TypeKind, TypeSymbol, VariableSymbol,
};
use once_cell::sync::Lazy;
use regex::Regex;

static FUNC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^func\s+(?:\(\s*(\w+)\s+\*?([A-Za-z_]\w*)\s*\)\s+)?([A-Za-z_]\w*)\s*\(([^)]*)\)\s*([^{]*)\{?\s*$")
        .unwrap()
});
static STRUCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type\s+([A-Za-z_]\w*)\s+struct\s*\{").unwrap());
static INTERFACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^type\s+([A-Za-z_]\w*)\s+interface\s*\{").unwrap());
static IMPORT_SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^import\s+(?:(\w+)\s+)?"([^"]+)""#).unwrap());
static IMPORT_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(?:(\w+)\s+)?"([^"]+)""#).unwrap());
static VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(var|const)\s+([A-Za-z_]\w*)").unwrap());
static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_]\w*)\s+([^`/]+)").unwrap());
static CALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z_][\w.]*)\s*\(").unwrap());

const KEYWORDS: &[&str] = &[
    "if", "for", "switch", "select", "go", "defer", "return", "func", "range", "case", "panic",
];

/// Extract a Go-family file by line scanning.
pub fn extract(path: &str, size: u64, language_label: &str, content: &str) -> FileSymbolRecord {
    let mut record = FileSymbolRecord::empty(path, size, language_label);
    let lines: Vec<&str> = content.lines().collect();

    record.description = file_description(&lines);

    let mut pending_comments: Vec<String> = Vec::new();
    let mut in_import_block = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if in_import_block {
            if trimmed.starts_with(')') {
                in_import_block = false;
            } else if let Some(caps) = IMPORT_ITEM_RE.captures(line) {
                record.imports.push(import_record(&caps));
            }
            i += 1;
            continue;
        }

        if trimmed.is_empty() {
            pending_comments.clear();
            i += 1;
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix("//") {
            pending_comments.push(comment.trim().to_string());
            i += 1;
            continue;
        }

        if trimmed == "import (" || trimmed.starts_with("import (") {
            in_import_block = true;
            pending_comments.clear();
            i += 1;
            continue;
        }
        if let Some(caps) = IMPORT_SINGLE_RE.captures(line) {
            record.imports.push(import_record(&caps));
            pending_comments.clear();
            i += 1;
            continue;
        }

        if let Some(caps) = STRUCT_RE.captures(line) {
            let name = caps[1].to_string();
            let exported = is_exported(&name);
            let description = take_description(&mut pending_comments);
            let properties = read_struct_fields(&lines, i);
            ensure_class(&mut record, &name, i as u32 + 1, exported, description);
            if let Some(class) = record.classes.iter_mut().find(|c| c.name == name) {
                class.properties = properties;
            }
            if exported {
                push_export(&mut record, &name);
            }
            i += 1;
            continue;
        }

        if let Some(caps) = INTERFACE_RE.captures(line) {
            let name = caps[1].to_string();
            let description = take_description(&mut pending_comments);
            let fields = read_interface_methods(&lines, i);
            if is_exported(&name) {
                push_export(&mut record, &name);
            }
            record.types.push(TypeSymbol {
                name,
                kind: TypeKind::Interface,
                fields,
                values: Vec::new(),
                description,
            });
            i += 1;
            continue;
        }

        if let Some(caps) = FUNC_RE.captures(line) {
            let receiver_type = caps.get(2).map(|m| m.as_str().to_string());
            let name = caps[3].to_string();
            let params = parse_params(&caps[4]);
            let return_type = caps
                .get(5)
                .map(|m| m.as_str().trim().to_string())
                .filter(|t| !t.is_empty());
            let description = take_description(&mut pending_comments);
            let exported = is_exported(&name);

            if let Some(receiver) = receiver_type {
                // Method with a receiver clause: attach to the struct symbol,
                // creating it if the method appears before the type.
                ensure_class(&mut record, &receiver, i as u32 + 1, is_exported(&receiver), None);
                if let Some(class) = record.classes.iter_mut().find(|c| c.name == receiver) {
                    class.methods.push(MethodSymbol {
                        name,
                        params,
                        return_type,
                        description,
                    });
                }
            } else {
                let call_sites = collect_call_sites(&lines, i);
                record.functions.push(FunctionSymbol {
                    name: name.clone(),
                    params,
                    return_type,
                    exported,
                    line: i as u32 + 1,
                    description,
                    is_async: false,
                    is_component: false,
                    call_sites,
                });
                if exported {
                    push_export(&mut record, &name);
                }
            }
            i += 1;
            continue;
        }

        if let Some(caps) = VAR_RE.captures(line) {
            let name = caps[2].to_string();
            let exported = is_exported(&name);
            record.variables.push(VariableSymbol {
                name: name.clone(),
                kind: caps[1].to_string(),
                line: i as u32 + 1,
                exported,
            });
            if exported {
                push_export(&mut record, &name);
            }
        }

        pending_comments.clear();
        i += 1;
    }

    record
}

fn import_record(caps: &regex::Captures) -> ImportRecord {
    let source = caps[2].to_string();
    let local = caps
        .get(1)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| {
            source
                .rsplit('/')
                .next()
                .unwrap_or(&source)
                .to_string()
        });
    ImportRecord {
        source,
        names: vec![local],
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}

fn push_export(record: &mut FileSymbolRecord, name: &str) {
    if !record.exports.iter().any(|e| e == name) {
        record.exports.push(name.to_string());
    }
}

fn ensure_class(
    record: &mut FileSymbolRecord,
    name: &str,
    line: u32,
    exported: bool,
    description: Option<String>,
) {
    if let Some(class) = record.classes.iter_mut().find(|c| c.name == name) {
        if class.description.is_none() {
            class.description = description;
        }
        return;
    }
    record.classes.push(ClassSymbol {
        name: name.to_string(),
        methods: Vec::new(),
        properties: Vec::new(),
        exported,
        line,
        extends: None,
        implements: Vec::new(),
        description,
    });
}

/// Field lines of a struct block, up to the closing brace.
fn read_struct_fields(lines: &[&str], decl_idx: usize) -> Vec<PropertySymbol> {
    let mut properties = Vec::new();
    for line in lines.iter().skip(decl_idx + 1) {
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if let Some(caps) = FIELD_RE.captures(line) {
            properties.push(PropertySymbol {
                name: caps[1].to_string(),
                prop_type: Some(caps[2].trim().to_string()),
            });
        }
    }
    properties
}

/// Method signatures of an interface block, captured as fields.
fn read_interface_methods(lines: &[&str], decl_idx: usize) -> Vec<TypeField> {
    let mut fields = Vec::new();
    for line in lines.iter().skip(decl_idx + 1) {
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if let Some(open) = trimmed.find('(') {
            let name = trimmed[..open].trim().to_string();
            if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                fields.push(TypeField {
                    name,
                    field_type: trimmed[open..].trim().to_string(),
                    optional: false,
                });
            }
        }
    }
    fields
}

fn parse_params(raw: &str) -> Vec<Param> {
    let mut params = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mut pieces = part.splitn(2, ' ');
        let name = pieces.next().unwrap_or("").trim().to_string();
        let param_type = pieces
            .next()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if !name.is_empty() {
            params.push(Param { name, param_type });
        }
    }
    params
}

/// Callee names in the function body, tracked by brace depth from the
/// declaration line.
fn collect_call_sites(lines: &[&str], decl_idx: usize) -> Vec<String> {
    let mut sites: Vec<String> = Vec::new();
    let mut depth: i32 = 0;
    for (offset, line) in lines.iter().skip(decl_idx).enumerate() {
        if offset > 0 {
            let trimmed = line.trim();
            if !trimmed.starts_with("//") {
                for caps in CALL_RE.captures_iter(line) {
                    let callee = caps[1].to_string();
                    let head = callee.split('.').next().unwrap_or(&callee);
                    if KEYWORDS.contains(&head) {
                        continue;
                    }
                    if !sites.iter().any(|s| *s == callee) {
                        sites.push(callee);
                    }
                }
            }
        }
        depth += line.matches('{').count() as i32;
        depth -= line.matches('}').count() as i32;
        if offset > 0 && depth <= 0 {
            break;
        }
    }
    sites
}

/// Drain the accumulated leading comments into a single description string.
fn take_description(pending: &mut Vec<String>) -> Option<String> {
    if pending.is_empty() {
        return None;
    }
    let text = pending.join("\n");
    pending.clear();
    Some(text)
}

/// Leading `//` comment block at the top of the file.
fn file_description(lines: &[&str]) -> Option<String> {
    let mut comments = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if let Some(comment) = trimmed.strip_prefix("//") {
            comments.push(comment.trim().to_string());
            continue;
        }
        break;
    }
    if comments.is_empty() {
        None
    } else {
        Some(comments.join("\n"))
    }
}
