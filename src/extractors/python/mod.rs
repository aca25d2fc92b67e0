//! Python-family heuristic extractor
//!
//! No parser is wired for this family; extraction is a line-oriented scan
//! with regex rules. Scoping is by indentation: a `def` indented under a
//! `class` is a method of that class. Preceding `#` comment runs and
//! docstrings become descriptions. There is no export syntax, so top-level
//! names not prefixed with `_` are treated as exported.

use crate::extractors::base::{
    ClassSymbol, FileSymbolRecord, FunctionSymbol, ImportRecord, MethodSymbol, Param,
    VariableSymbol,
};
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)\s*(?:\(([^)]*)\))?\s*:").unwrap());
static DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*)(async\s+)?def\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*(?:->\s*([^:]+))?:").unwrap()
});
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^import\s+(.+)$").unwrap());
static FROM_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^from\s+(\S+)\s+import\s+(.+)$").unwrap());
static ASSIGN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]\w*)\s*(?::\s*[^=]+)?=[^=]").unwrap());
static CALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z_][\w.]*)\s*\(").unwrap());

const KEYWORDS: &[&str] = &[
    "if", "elif", "while", "for", "with", "except", "return", "assert", "lambda", "not", "and",
    "or", "in", "is", "def", "class", "yield", "raise", "del",
];

/// Extract a Python-family file by line scanning.
pub fn extract(path: &str, size: u64, language_label: &str, content: &str) -> FileSymbolRecord {
    let mut record = FileSymbolRecord::empty(path, size, language_label);
    let lines: Vec<&str> = content.lines().collect();

    record.description = file_description(&lines);

    // Index into record.classes for the class whose suite we are inside.
    let mut current_class: Option<usize> = None;
    let mut pending_comments: Vec<String> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            pending_comments.clear();
            i += 1;
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            pending_comments.push(comment.trim().to_string());
            i += 1;
            continue;
        }

        if let Some(caps) = CLASS_RE.captures(line) {
            let name = caps[1].to_string();
            let extends = caps
                .get(2)
                .map(|bases| bases.as_str())
                .and_then(first_base);
            let description = take_description(&mut pending_comments)
                .or_else(|| docstring_after(&lines, i));
            let exported = !name.starts_with('_');
            record.classes.push(ClassSymbol {
                name: name.clone(),
                methods: Vec::new(),
                properties: Vec::new(),
                exported,
                line: i as u32 + 1,
                extends,
                implements: Vec::new(),
                description,
            });
            current_class = Some(record.classes.len() - 1);
            if exported {
                record.exports.push(name);
            }
            i += 1;
            continue;
        }

        if let Some(caps) = DEF_RE.captures(line) {
            let indent = caps[1].len();
            let is_async = caps.get(2).is_some();
            let name = caps[3].to_string();
            let params = parse_params(&caps[4], indent > 0);
            let return_type = caps.get(5).map(|r| r.as_str().trim().to_string());
            let description = take_description(&mut pending_comments)
                .or_else(|| docstring_after(&lines, i));

            if indent > 0 {
                // Indented def: a method when we are inside a class suite.
                if let Some(class_idx) = current_class {
                    record.classes[class_idx].methods.push(MethodSymbol {
                        name,
                        params,
                        return_type,
                        description,
                    });
                }
            } else {
                current_class = None;
                let exported = !name.starts_with('_');
                let call_sites = collect_call_sites(&lines, i, indent);
                record.functions.push(FunctionSymbol {
                    name: name.clone(),
                    params,
                    return_type,
                    exported,
                    line: i as u32 + 1,
                    description,
                    is_async,
                    is_component: false,
                    call_sites,
                });
                if exported {
                    record.exports.push(name);
                }
            }
            i += 1;
            continue;
        }

        // Remaining rules only apply at top level.
        let at_top_level = !line.starts_with(' ') && !line.starts_with('\t');
        if at_top_level {
            current_class = None;

            if let Some(caps) = FROM_IMPORT_RE.captures(line) {
                let source = caps[1].to_string();
                let names = caps[2]
                    .trim_end_matches('\\')
                    .split(',')
                    .map(local_import_name)
                    .filter(|n| !n.is_empty() && *n != "(")
                    .map(str::to_string)
                    .collect();
                record.imports.push(ImportRecord { source, names });
            } else if let Some(caps) = IMPORT_RE.captures(line) {
                for part in caps[1].split(',') {
                    let source = part
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string();
                    if source.is_empty() {
                        continue;
                    }
                    let name = local_import_name(part).to_string();
                    record.imports.push(ImportRecord {
                        source,
                        names: vec![name],
                    });
                }
            } else if let Some(caps) = ASSIGN_RE.captures(line) {
                let name = caps[1].to_string();
                let exported = !name.starts_with('_');
                let kind = if name.chars().all(|c| !c.is_lowercase()) {
                    "const"
                } else {
                    "var"
                };
                record.variables.push(VariableSymbol {
                    name: name.clone(),
                    kind: kind.to_string(),
                    line: i as u32 + 1,
                    exported,
                });
                if exported {
                    record.exports.push(name);
                }
            }
        }

        pending_comments.clear();
        i += 1;
    }

    record
}

/// Module docstring, or a leading `#` run, at the very top of the file.
fn file_description(lines: &[&str]) -> Option<String> {
    let mut comments = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if comments.is_empty() {
                continue;
            }
            break;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if trimmed.starts_with("#!") {
                continue;
            }
            comments.push(comment.trim().to_string());
            continue;
        }
        if trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''") {
            return read_docstring(lines, idx);
        }
        break;
    }
    if comments.is_empty() {
        None
    } else {
        Some(comments.join("\n"))
    }
}

/// Docstring on the line(s) following a `def`/`class` header.
fn docstring_after(lines: &[&str], decl_idx: usize) -> Option<String> {
    let mut idx = decl_idx + 1;
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }
    if idx >= lines.len() {
        return None;
    }
    let trimmed = lines[idx].trim();
    if trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''") {
        read_docstring(lines, idx)
    } else {
        None
    }
}

fn read_docstring(lines: &[&str], start: usize) -> Option<String> {
    let first = lines[start].trim();
    let quote = if first.starts_with("\"\"\"") { "\"\"\"" } else { "'''" };
    let inner = &first[quote.len()..];

    // Single-line docstring.
    if let Some(end) = inner.find(quote) {
        let text = inner[..end].trim();
        return if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
    }

    let mut parts: Vec<String> = Vec::new();
    if !inner.trim().is_empty() {
        parts.push(inner.trim().to_string());
    }
    for line in lines.iter().skip(start + 1) {
        let trimmed = line.trim();
        if let Some(end) = trimmed.find(quote) {
            let text = trimmed[..end].trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
            break;
        }
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn take_description(pending: &mut Vec<String>) -> Option<String> {
    if pending.is_empty() {
        return None;
    }
    let text = pending.join("\n");
    pending.clear();
    Some(text)
}

fn parse_params(raw: &str, is_method: bool) -> Vec<Param> {
    let mut params = Vec::new();
    for (idx, part) in raw.split(',').enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if is_method && idx == 0 && (part == "self" || part == "cls") {
            continue;
        }
        let without_default = part.split('=').next().unwrap_or(part);
        let mut pieces = without_default.splitn(2, ':');
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

/// Callee names observed in the function's indented suite.
fn collect_call_sites(lines: &[&str], def_idx: usize, def_indent: usize) -> Vec<String> {
    let mut sites: Vec<String> = Vec::new();
    for line in lines.iter().skip(def_idx + 1) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - trimmed.len();
        if indent <= def_indent {
            break;
        }
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
    sites
}

fn first_base(bases: &str) -> Option<String> {
    bases
        .split(',')
        .map(str::trim)
        .find(|b| !b.is_empty() && *b != "object" && !b.contains('='))
        .map(|b| b.split('[').next().unwrap_or(b).trim().to_string())
}

/// The locally bound name of one import clause item (`x as y` binds `y`).
fn local_import_name(part: &str) -> &str {
    let part = part.trim().trim_matches(|c| c == '(' || c == ')');
    if let Some((_, alias)) = part.split_once(" as ") {
        alias.trim()
    } else {
        part.rsplit('.').next().unwrap_or(part).trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_py(content: &str) -> FileSymbolRecord {
        extract("pkg/service.py", content.len() as u64, "Python", content)
    }

    #[test]
    fn test_top_level_functions_and_docstrings() {
        let record = extract_py(
            "def load_user(user_id: str) -> User:\n    \"\"\"Fetch one user.\"\"\"\n    return repo.get(user_id)\n\nasync def _refresh():\n    pass\n",
        );
        assert_eq!(record.functions.len(), 2);
        let f = &record.functions[0];
        assert_eq!(f.name, "load_user");
        assert_eq!(f.params[0].name, "user_id");
        assert_eq!(f.params[0].param_type.as_deref(), Some("str"));
        assert_eq!(f.return_type.as_deref(), Some("User"));
        assert_eq!(f.description.as_deref(), Some("Fetch one user."));
        assert!(f.call_sites.contains(&"repo.get".to_string()));
        let private = &record.functions[1];
        assert!(private.is_async);
        assert!(!private.exported, "underscore names are not exported");
        assert!(!record.exports.contains(&"_refresh".to_string()));
    }

    #[test]
    fn test_methods_attach_by_indentation() {
        let record = extract_py(
            "class UserRepo(BaseRepo):\n    def get(self, user_id):\n        return self.db.find(user_id)\n\n    def save(self, user):\n        self.db.put(user)\n\ndef standalone():\n    pass\n",
        );
        assert_eq!(record.classes.len(), 1);
        let class = &record.classes[0];
        assert_eq!(class.name, "UserRepo");
        assert_eq!(class.extends.as_deref(), Some("BaseRepo"));
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.methods[0].name, "get");
        assert_eq!(
            class.methods[0].params.len(),
            1,
            "self is not a parameter"
        );
        assert_eq!(record.functions.len(), 1);
        assert_eq!(record.functions[0].name, "standalone");
    }

    #[test]
    fn test_imports_bind_local_names() {
        let record = extract_py(
            "import os\nimport numpy as np\nfrom .models import User, Role as R\nfrom . import helpers\n",
        );
        assert_eq!(record.imports.len(), 4);
        assert_eq!(record.imports[0].source, "os");
        assert_eq!(record.imports[1].names, vec!["np"]);
        assert_eq!(record.imports[2].source, ".models");
        assert_eq!(record.imports[2].names, vec!["User", "R"]);
        assert_eq!(record.imports[3].source, ".");
        assert_eq!(record.imports[3].names, vec!["helpers"]);
    }

    #[test]
    fn test_module_docstring_and_variables() {
        let record = extract_py(
            "\"\"\"Billing helpers.\"\"\"\n\nMAX_RETRIES = 3\n_internal = True\n",
        );
        assert_eq!(record.description.as_deref(), Some("Billing helpers."));
        assert_eq!(record.variables.len(), 2);
        assert_eq!(record.variables[0].name, "MAX_RETRIES");
        assert_eq!(record.variables[0].kind, "const");
        assert!(record.variables[0].exported);
        assert!(!record.variables[1].exported);
    }

    #[test]
    fn test_comment_run_becomes_description() {
        let record = extract_py(
            "x = 1\n\n# Retries the outbound call\n# with exponential backoff.\ndef retry():\n    pass\n",
        );
        let f = &record.functions[0];
        assert_eq!(
            f.description.as_deref(),
            Some("Retries the outbound call\nwith exponential backoff.")
        );
    }

    #[test]
    fn test_unparseable_content_yields_empty_record() {
        let record = extract_py("\u{0}\u{1}\u{2} not python at all }{");
        assert!(record.functions.is_empty());
        assert!(record.classes.is_empty());
    }
}
