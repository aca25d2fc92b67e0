//! Call Graph Builder
//!
//! Resolves the textual call sites recorded by extraction into a directed
//! function graph. Resolution is a priority-ordered chain, each tier
//! independently testable: same-file exact match, then import-matched
//! exported function, then trailing-segment match as a last resort. Edges
//! are recorded bidirectionally and deduplicated per ordered pair.

use crate::index::ProjectIndex;
use crate::maps::types::{function_id, CallGraph, CallNode};
use std::collections::{HashMap, HashSet};

/// Build the call graph from the full index.
pub fn build(index: &ProjectIndex) -> CallGraph {
    let mut nodes: Vec<CallNode> = Vec::new();
    // (file, name) -> node index, for same-file resolution.
    let mut local_lookup: HashMap<(String, String), usize> = HashMap::new();
    // name -> exported node index, for import matches. Last writer wins on
    // a name collision (documented limitation).
    let mut exported_lookup: HashMap<String, usize> = HashMap::new();
    // simple name -> node indexes in index order, for the fallback tier.
    let mut by_simple_name: HashMap<String, Vec<usize>> = HashMap::new();
    // file -> locally bound import names.
    let mut imported_names: HashMap<&str, HashSet<&str>> = HashMap::new();

    for file in &index.files {
        let names: HashSet<&str> = file
            .imports
            .iter()
            .flat_map(|i| i.names.iter().map(String::as_str))
            .collect();
        imported_names.insert(file.path.as_str(), names);

        for function in &file.functions {
            let idx = nodes.len();
            nodes.push(CallNode {
                id: function_id(&file.path, &function.name),
                name: function.name.clone(),
                file: file.path.clone(),
                exported: function.exported,
                calls: Vec::new(),
                called_by: Vec::new(),
            });
            local_lookup.insert((file.path.clone(), function.name.clone()), idx);
            if function.exported {
                exported_lookup.insert(function.name.clone(), idx);
            }
            by_simple_name
                .entry(function.name.clone())
                .or_default()
                .push(idx);
        }
    }

    // Resolve every recorded call site and record edges bidirectionally.
    let mut edges: HashSet<(usize, usize)> = HashSet::new();
    for file in &index.files {
        let imports = &imported_names[file.path.as_str()];
        for function in &file.functions {
            let caller_idx = local_lookup[&(file.path.clone(), function.name.clone())];
            for site in &function.call_sites {
                let Some(target_idx) =
                    resolve(site, &file.path, imports, &local_lookup, &exported_lookup, &by_simple_name, caller_idx)
                else {
                    continue;
                };
                if target_idx == caller_idx {
                    continue;
                }
                edges.insert((caller_idx, target_idx));
            }
        }
    }

    let mut sorted_edges: Vec<(usize, usize)> = edges.into_iter().collect();
    sorted_edges.sort();
    for (caller, callee) in sorted_edges {
        let callee_id = nodes[callee].id.clone();
        let caller_id = nodes[caller].id.clone();
        nodes[caller].calls.push(callee_id);
        nodes[callee].called_by.push(caller_id);
    }

    // Bound output size: functions that are neither exported nor on any
    // edge carry no information downstream.
    let functions: Vec<CallNode> = nodes
        .into_iter()
        .filter(|n| n.exported || !n.calls.is_empty() || !n.called_by.is_empty())
        .collect();

    CallGraph { functions }
}

/// The three-tier resolution chain. Returns the resolved node index, or
/// None when every tier misses (the call drops out of the graph).
fn resolve(
    site: &str,
    caller_file: &str,
    imports: &HashSet<&str>,
    local_lookup: &HashMap<(String, String), usize>,
    exported_lookup: &HashMap<String, usize>,
    by_simple_name: &HashMap<String, Vec<usize>>,
    caller_idx: usize,
) -> Option<usize> {
    // Tier 1: same-file function with an exact name match.
    if let Some(&idx) = local_lookup.get(&(caller_file.to_string(), site.to_string())) {
        return Some(idx);
    }

    // Tier 2: a name this file imports, matched against an exported
    // function anywhere in the index.
    if imports.contains(site) {
        if let Some(&idx) = exported_lookup.get(site) {
            return Some(idx);
        }
    }

    // Tier 3: trailing segment after the final `.`, first match in index
    // order. Approximate by design.
    let simple = site.rsplit('.').next().unwrap_or(site);
    by_simple_name
        .get(simple)
        .and_then(|idxs| idxs.iter().find(|&&idx| idx != caller_idx))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{FileSymbolRecord, FunctionSymbol, ImportRecord};
    use crate::index::assemble;

    fn function(name: &str, exported: bool, call_sites: &[&str]) -> FunctionSymbol {
        FunctionSymbol {
            name: name.to_string(),
            params: Vec::new(),
            return_type: None,
            exported,
            line: 1,
            description: None,
            is_async: false,
            is_component: false,
            call_sites: call_sites.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn node<'a>(graph: &'a CallGraph, id: &str) -> &'a CallNode {
        graph
            .functions
            .iter()
            .find(|n| n.id == id)
            .unwrap_or_else(|| panic!("missing node {}", id))
    }

    #[test]
    fn test_same_file_resolution_wins() {
        let mut a = FileSymbolRecord::empty("src/a.ts", 1, "TypeScript");
        a.functions.push(function("run", true, &["helper"]));
        a.functions.push(function("helper", false, &[]));
        let mut b = FileSymbolRecord::empty("src/b.ts", 1, "TypeScript");
        b.functions.push(function("helper", true, &[]));

        let graph = build(&assemble(vec![a, b]));
        let run = node(&graph, "f:src/a.ts:run");
        assert_eq!(run.calls, vec!["f:src/a.ts:helper"]);
    }

    #[test]
    fn test_import_resolution_targets_exported_function() {
        let mut a = FileSymbolRecord::empty("src/a.ts", 1, "TypeScript");
        a.imports.push(ImportRecord {
            source: "./b".to_string(),
            names: vec!["fetchUser".to_string()],
        });
        a.functions.push(function("run", true, &["fetchUser"]));
        let mut b = FileSymbolRecord::empty("src/b.ts", 1, "TypeScript");
        b.functions.push(function("fetchUser", true, &[]));

        let graph = build(&assemble(vec![a, b]));
        let run = node(&graph, "f:src/a.ts:run");
        assert_eq!(run.calls, vec!["f:src/b.ts:fetchUser"]);
    }

    #[test]
    fn test_trailing_segment_fallback() {
        let mut a = FileSymbolRecord::empty("src/a.ts", 1, "TypeScript");
        a.functions.push(function("run", true, &["api.sendMail"]));
        let mut b = FileSymbolRecord::empty("src/mail.ts", 1, "TypeScript");
        b.functions.push(function("sendMail", false, &[]));

        let graph = build(&assemble(vec![a, b]));
        let run = node(&graph, "f:src/a.ts:run");
        assert_eq!(run.calls, vec!["f:src/mail.ts:sendMail"]);
    }

    #[test]
    fn test_unresolved_call_sites_drop_out() {
        let mut a = FileSymbolRecord::empty("src/a.ts", 1, "TypeScript");
        a.functions.push(function("run", true, &["console.log", "JSON.parse"]));

        let graph = build(&assemble(vec![a]));
        let run = node(&graph, "f:src/a.ts:run");
        assert!(run.calls.is_empty());
    }

    #[test]
    fn test_edges_are_bidirectional_and_deduplicated() {
        let mut a = FileSymbolRecord::empty("src/a.ts", 1, "TypeScript");
        a.functions
            .push(function("run", true, &["helper", "helper"]));
        a.functions.push(function("helper", false, &[]));

        let graph = build(&assemble(vec![a]));
        let run = node(&graph, "f:src/a.ts:run");
        let helper = node(&graph, "f:src/a.ts:helper");
        assert_eq!(run.calls.len(), 1);
        assert_eq!(helper.called_by, vec!["f:src/a.ts:run"]);

        // Symmetry: every calledBy edge has the reverse calls edge.
        for n in &graph.functions {
            for caller_id in &n.called_by {
                let caller = node(&graph, caller_id);
                assert!(
                    caller.calls.contains(&n.id),
                    "asymmetric edge {} -> {}",
                    caller_id,
                    n.id
                );
            }
        }
    }

    #[test]
    fn test_post_filter_drops_unexported_isolated_functions() {
        let mut a = FileSymbolRecord::empty("src/a.ts", 1, "TypeScript");
        a.functions.push(function("kept", true, &[]));
        a.functions.push(function("dropped", false, &[]));

        let graph = build(&assemble(vec![a]));
        let ids: Vec<&str> = graph.functions.iter().map(|n| n.id.as_str()).collect();
        assert!(ids.contains(&"f:src/a.ts:kept"));
        assert!(!ids.contains(&"f:src/a.ts:dropped"));
    }
}
