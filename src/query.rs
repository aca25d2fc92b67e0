//! Query Layer - read-only views over a built CodeMapBundle
//!
//! Six stateless views: `summary`, `classes`, `modules`, `calls`, `api`,
//! and `file`. Each returns a structured result with a success flag; a
//! query made before any bundle exists reports a structured failure, never
//! an error or panic.

use crate::maps::{modules, CodeMapBundle};
use serde::Serialize;
use serde_json::json;

/// One of the six named query views, with its optional filter.
#[derive(Debug, Clone, Copy)]
pub enum QueryView<'a> {
    Summary,
    Classes(Option<&'a str>),
    Modules(Option<&'a str>),
    Calls(Option<&'a str>),
    Api,
    File(&'a str),
}

/// Structured query outcome: a payload on success, a message otherwise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QueryResponse {
    fn ok(result: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            message: None,
        }
    }

    fn not_built() -> Self {
        Self {
            success: false,
            result: None,
            message: Some(
                "Code maps have not been built yet. Build the project index first.".to_string(),
            ),
        }
    }
}

/// Answer one query view over an optional bundle.
pub fn query(bundle: Option<&CodeMapBundle>, view: QueryView) -> QueryResponse {
    let Some(bundle) = bundle else {
        return QueryResponse::not_built();
    };

    match view {
        QueryView::Summary => summary(bundle),
        QueryView::Classes(filter) => classes(bundle, filter),
        QueryView::Modules(filter) => modules_view(bundle, filter),
        QueryView::Calls(filter) => calls(bundle, filter),
        QueryView::Api => QueryResponse::ok(json!({ "endpoints": bundle.api_map.endpoints })),
        QueryView::File(path) => file_view(bundle, path),
    }
}

fn summary(bundle: &CodeMapBundle) -> QueryResponse {
    // Top modules by total connection degree, ties broken by id.
    let mut module_degrees: Vec<(usize, &str)> = bundle
        .module_map
        .modules
        .iter()
        .map(|m| {
            let degree = bundle
                .module_map
                .connections
                .iter()
                .filter(|c| c.from == m.id || c.to == m.id)
                .count();
            (degree, m.id.as_str())
        })
        .collect();
    module_degrees.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));

    let mut called: Vec<(usize, &str)> = bundle
        .call_graph
        .functions
        .iter()
        .map(|f| (f.called_by.len(), f.id.as_str()))
        .collect();
    called.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));

    QueryResponse::ok(json!({
        "classes": bundle.class_map.classes.len(),
        "interfaces": bundle.class_map.interfaces.len(),
        "relationships": bundle.class_map.relationships.len(),
        "modules": bundle.module_map.modules.len(),
        "connections": bundle.module_map.connections.len(),
        "functions": bundle.call_graph.functions.len(),
        "endpoints": bundle.api_map.endpoints.len(),
        "generatedAt": bundle.generated_at,
        "topModules": module_degrees.iter().take(5).map(|(_, id)| *id).collect::<Vec<_>>(),
        "topCalled": called.iter().take(5).map(|(_, id)| *id).collect::<Vec<_>>(),
    }))
}

fn matches(haystack: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn classes(bundle: &CodeMapBundle, filter: Option<&str>) -> QueryResponse {
    let classes: Vec<_> = bundle
        .class_map
        .classes
        .iter()
        .filter(|c| matches(&c.name, filter))
        .collect();
    let interfaces: Vec<_> = bundle
        .class_map
        .interfaces
        .iter()
        .filter(|i| matches(&i.name, filter))
        .collect();

    let surviving: Vec<&str> = classes
        .iter()
        .map(|c| c.id.as_str())
        .chain(interfaces.iter().map(|i| i.id.as_str()))
        .collect();
    let relationships: Vec<_> = bundle
        .class_map
        .relationships
        .iter()
        .filter(|r| {
            surviving.contains(&r.from.as_str()) || surviving.contains(&r.to.as_str())
        })
        .collect();

    QueryResponse::ok(json!({
        "classes": classes,
        "interfaces": interfaces,
        "relationships": relationships,
    }))
}

fn modules_view(bundle: &CodeMapBundle, filter: Option<&str>) -> QueryResponse {
    let modules: Vec<_> = bundle
        .module_map
        .modules
        .iter()
        .filter(|m| matches(&m.path, filter) || matches(&m.id, filter))
        .collect();

    let surviving: Vec<&str> = modules.iter().map(|m| m.id.as_str()).collect();
    let connections: Vec<_> = bundle
        .module_map
        .connections
        .iter()
        .filter(|c| surviving.contains(&c.from.as_str()) || surviving.contains(&c.to.as_str()))
        .collect();

    // Layers restricted to surviving modules; empty buckets drop out.
    let layers: Vec<serde_json::Value> = bundle
        .module_map
        .layers
        .iter()
        .filter_map(|layer| {
            let kept: Vec<&str> = layer
                .modules
                .iter()
                .map(String::as_str)
                .filter(|id| surviving.contains(id))
                .collect();
            if kept.is_empty() {
                None
            } else {
                Some(json!({ "name": layer.name, "modules": kept }))
            }
        })
        .collect();

    QueryResponse::ok(json!({
        "modules": modules,
        "connections": connections,
        "layers": layers,
    }))
}

fn calls(bundle: &CodeMapBundle, filter: Option<&str>) -> QueryResponse {
    let functions: Vec<_> = bundle
        .call_graph
        .functions
        .iter()
        .filter(|f| matches(&f.name, filter) || matches(&f.file, filter))
        .collect();
    QueryResponse::ok(json!({ "functions": functions }))
}

fn file_view(bundle: &CodeMapBundle, path: &str) -> QueryResponse {
    let classes: Vec<_> = bundle
        .class_map
        .classes
        .iter()
        .filter(|c| c.file == path)
        .collect();
    let interfaces: Vec<_> = bundle
        .class_map
        .interfaces
        .iter()
        .filter(|i| i.file == path)
        .collect();
    let functions: Vec<_> = bundle
        .call_graph
        .functions
        .iter()
        .filter(|f| f.file == path)
        .collect();
    let endpoints: Vec<_> = bundle
        .api_map
        .endpoints
        .iter()
        .filter(|e| e.file == path)
        .collect();

    let dir = modules::dir_of(path);
    let module = bundle.module_map.modules.iter().find(|m| m.path == dir);

    QueryResponse::ok(json!({
        "file": path,
        "classes": classes,
        "interfaces": interfaces,
        "functions": functions,
        "endpoints": endpoints,
        "module": module,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{
        ClassSymbol, FileSymbolRecord, FunctionSymbol, ImportRecord, TypeKind, TypeSymbol,
    };
    use crate::index::assemble;
    use crate::maps::build_bundle;

    fn sample_bundle() -> CodeMapBundle {
        let mut a = FileSymbolRecord::empty("src/app.ts", 10, "TypeScript");
        a.imports.push(ImportRecord {
            source: "../lib/repo".to_string(),
            names: vec!["findUser".to_string()],
        });
        a.functions.push(FunctionSymbol {
            name: "main".to_string(),
            params: Vec::new(),
            return_type: None,
            exported: true,
            line: 1,
            description: None,
            is_async: false,
            is_component: false,
            call_sites: vec!["findUser".to_string()],
        });

        let mut b = FileSymbolRecord::empty("lib/repo.ts", 20, "TypeScript");
        b.functions.push(FunctionSymbol {
            name: "findUser".to_string(),
            params: Vec::new(),
            return_type: None,
            exported: true,
            line: 1,
            description: None,
            is_async: false,
            is_component: false,
            call_sites: Vec::new(),
        });
        b.classes.push(ClassSymbol {
            name: "Repo".to_string(),
            methods: Vec::new(),
            properties: Vec::new(),
            exported: true,
            line: 5,
            extends: None,
            implements: vec!["Store".to_string()],
            description: None,
        });
        b.types.push(TypeSymbol {
            name: "Store".to_string(),
            kind: TypeKind::Interface,
            fields: Vec::new(),
            values: Vec::new(),
            description: None,
        });
        b.exports = vec!["findUser".to_string(), "Repo".to_string()];

        build_bundle(&assemble(vec![a, b]))
    }

    #[test]
    fn test_query_without_bundle_is_a_structured_failure() {
        let response = query(None, QueryView::Summary);
        assert!(!response.success);
        assert!(response.result.is_none());
        assert!(response.message.unwrap().contains("not been built"));
    }

    #[test]
    fn test_summary_counts() {
        let bundle = sample_bundle();
        let response = query(Some(&bundle), QueryView::Summary);
        assert!(response.success);
        let result = response.result.unwrap();
        assert_eq!(result["classes"], 1);
        assert_eq!(result["interfaces"], 1);
        assert_eq!(result["modules"], 2);
        assert_eq!(result["connections"], 1);
    }

    #[test]
    fn test_classes_filter_pulls_touching_relationships() {
        let bundle = sample_bundle();
        let response = query(Some(&bundle), QueryView::Classes(Some("repo")));
        let result = response.result.unwrap();
        assert_eq!(result["classes"].as_array().unwrap().len(), 1);
        // The implements edge touches the surviving class, so it is pulled
        // in even though the interface itself was filtered out.
        assert_eq!(result["relationships"].as_array().unwrap().len(), 1);
        assert_eq!(result["interfaces"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_modules_filter_keeps_touching_connections() {
        let bundle = sample_bundle();
        let response = query(Some(&bundle), QueryView::Modules(Some("lib")));
        let result = response.result.unwrap();
        assert_eq!(result["modules"].as_array().unwrap().len(), 1);
        assert_eq!(result["connections"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_calls_filter_by_name_or_file() {
        let bundle = sample_bundle();
        let by_name = query(Some(&bundle), QueryView::Calls(Some("finduser")));
        assert_eq!(
            by_name.result.unwrap()["functions"].as_array().unwrap().len(),
            1
        );
        let by_file = query(Some(&bundle), QueryView::Calls(Some("src/app.ts")));
        assert_eq!(
            by_file.result.unwrap()["functions"].as_array().unwrap().len(),
            1
        );
    }

    #[test]
    fn test_api_view_lists_endpoints() {
        let bundle = sample_bundle();
        let response = query(Some(&bundle), QueryView::Api);
        assert!(response.success);
        assert!(response.result.unwrap()["endpoints"].is_array());
    }

    #[test]
    fn test_file_view_collects_everything_for_a_path() {
        let bundle = sample_bundle();
        let response = query(Some(&bundle), QueryView::File("lib/repo.ts"));
        let result = response.result.unwrap();
        assert_eq!(result["classes"].as_array().unwrap().len(), 1);
        assert_eq!(result["interfaces"].as_array().unwrap().len(), 1);
        assert_eq!(result["functions"].as_array().unwrap().len(), 1);
        assert_eq!(result["module"]["id"], "mod:lib");
    }
}
