//! Module Map Builder
//!
//! Groups files by containing directory, resolves relative imports into
//! cross-module connections, and buckets modules into architectural layers
//! from their connectivity degree. Intra-module imports never produce a
//! connection.

use crate::index::ProjectIndex;
use crate::maps::types::{module_id, Layer, ModuleConnection, ModuleMap, ModuleNode};
use std::collections::{BTreeMap, HashSet};

/// Cap on the publicAPI listing per module.
const PUBLIC_API_LIMIT: usize = 20;

/// Extension and index-file fallbacks tried when resolving a relative import.
const RESOLUTION_SUFFIXES: &[&str] = &[
    ".ts",
    ".tsx",
    ".js",
    ".jsx",
    ".mjs",
    ".cjs",
    ".py",
    ".go",
    "/index.ts",
    "/index.tsx",
    "/index.js",
    "/index.jsx",
];

/// Build the module map from the full index.
pub fn build(index: &ProjectIndex) -> ModuleMap {
    let known_files: HashSet<&str> = index.files.iter().map(|f| f.path.as_str()).collect();

    // One module per distinct directory, in sorted order.
    let mut by_dir: BTreeMap<String, Vec<&crate::extractors::base::FileSymbolRecord>> =
        BTreeMap::new();
    for file in &index.files {
        by_dir.entry(dir_of(&file.path)).or_default().push(file);
    }

    let mut modules: Vec<ModuleNode> = Vec::new();
    for (dir, files) in &by_dir {
        let mut exports: Vec<String> = Vec::new();
        let mut public_api: Vec<String> = Vec::new();
        for file in files {
            for export in &file.exports {
                if !exports.iter().any(|e| e == export) {
                    exports.push(export.clone());
                }
            }
            for function in &file.functions {
                if function.exported && public_api.len() < PUBLIC_API_LIMIT {
                    public_api.push(function.name.clone());
                }
            }
            for class in &file.classes {
                if class.exported && public_api.len() < PUBLIC_API_LIMIT {
                    public_api.push(class.name.clone());
                }
            }
        }
        modules.push(ModuleNode {
            id: module_id(dir),
            path: dir.clone(),
            files: files.iter().map(|f| f.path.clone()).collect(),
            exports,
            public_api,
        });
    }

    // Accumulate one connection per ordered module pair.
    let mut pairs: BTreeMap<(String, String), (usize, Vec<String>)> = BTreeMap::new();
    for file in &index.files {
        let from_dir = dir_of(&file.path);
        for import in &file.imports {
            if !is_relative(&import.source) {
                continue;
            }
            let target_dir = resolve_import_dir(&import.source, &from_dir, &known_files);
            if target_dir == from_dir {
                continue;
            }
            let entry = pairs
                .entry((from_dir.clone(), target_dir))
                .or_insert((0, Vec::new()));
            entry.0 += 1;
            for name in &import.names {
                if !entry.1.iter().any(|n| n == name) {
                    entry.1.push(name.clone());
                }
            }
        }
    }

    let connections: Vec<ModuleConnection> = pairs
        .into_iter()
        .map(|((from, to), (imports, exports_used))| ModuleConnection {
            from: module_id(&from),
            to: module_id(&to),
            imports,
            exports_used,
        })
        .collect();

    let layers = classify_layers(&modules, &connections);

    ModuleMap {
        modules,
        connections,
        layers,
    }
}

/// Directory of a repo-relative path; `.` for root-level files.
pub(crate) fn dir_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => ".".to_string(),
    }
}

fn is_relative(source: &str) -> bool {
    source.starts_with('.') || source.starts_with('/')
}

/// Resolve a relative import to the directory of its target file.
///
/// Tries the literal path and the fixed fallback set against the known file
/// set; when nothing matches, the import path's own normalized directory is
/// the best-guess target.
fn resolve_import_dir(source: &str, from_dir: &str, known_files: &HashSet<&str>) -> String {
    let base = if let Some(rooted) = source.strip_prefix('/') {
        normalize(rooted)
    } else {
        normalize(&format!("{}/{}", from_dir, source))
    };

    if known_files.contains(base.as_str()) {
        return dir_of(&base);
    }
    for suffix in RESOLUTION_SUFFIXES {
        let candidate = format!("{}{}", base, suffix);
        if known_files.contains(candidate.as_str()) {
            return dir_of(&candidate);
        }
    }

    dir_of(&base)
}

/// Collapse `.` and `..` segments of a joined path.
fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    if stack.is_empty() {
        ".".to_string()
    } else {
        stack.join("/")
    }
}

/// Bucket modules by degree: Entry Points, Core, Shared/Utilities,
/// Standalone. Non-empty buckets only, in that fixed order.
fn classify_layers(modules: &[ModuleNode], connections: &[ModuleConnection]) -> Vec<Layer> {
    let mut entry_points = Vec::new();
    let mut core = Vec::new();
    let mut shared = Vec::new();
    let mut standalone = Vec::new();

    for module in modules {
        let out_degree = connections.iter().filter(|c| c.from == module.id).count();
        let in_degree = connections.iter().filter(|c| c.to == module.id).count();

        if in_degree == 0 && out_degree == 0 {
            standalone.push(module.id.clone());
        } else if in_degree == 0 && out_degree > 0 {
            entry_points.push(module.id.clone());
        } else if in_degree > 2 && out_degree <= 1 {
            shared.push(module.id.clone());
        } else {
            core.push(module.id.clone());
        }
    }

    let buckets = [
        ("Entry Points", entry_points),
        ("Core", core),
        ("Shared/Utilities", shared),
        ("Standalone", standalone),
    ];
    buckets
        .into_iter()
        .filter(|(_, modules)| !modules.is_empty())
        .map(|(name, modules)| Layer {
            name: name.to_string(),
            modules,
        })
        .collect()
}
