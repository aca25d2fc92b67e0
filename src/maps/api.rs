//! API Map Builder
//!
//! Detects HTTP-style endpoints from three independent, additive rules:
//! path-based routing files (`.../route.ts` exporting verb-named handlers),
//! conventional api-directory handler files, and registration-style call
//! sites (`router.get(...)`). A file or function may match more than one
//! rule.

use crate::index::ProjectIndex;
use crate::maps::types::{ApiEndpoint, ApiMap};
use once_cell::sync::Lazy;
use regex::Regex;

const HTTP_VERBS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// `<identifier>.<verb>` shaped call site. Case-insensitive so that both
/// `app.get` and receiver-style `r.Get` register.
static REGISTRATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Za-z_$][A-Za-z0-9_$]*\.(get|post|put|delete|patch|head|options)$")
        .unwrap()
});

/// Conventional root segments stripped from route paths.
const ROOT_SEGMENTS: &[&str] = &["src", "app", "pages"];

/// Placeholder path for registration-style endpoints: the literal route
/// argument is not captured by call-site text alone.
const UNRESOLVED_PATH: &str = "(unresolved)";

/// Build the API map from the full index.
pub fn build(index: &ProjectIndex) -> ApiMap {
    let mut endpoints: Vec<ApiEndpoint> = Vec::new();

    for file in &index.files {
        collect_route_file_endpoints(file, &mut endpoints);
        collect_api_dir_endpoints(file, &mut endpoints);
        collect_registration_endpoints(file, &mut endpoints);
    }

    ApiMap { endpoints }
}

/// Rule 1: `<route-segments>/route.<ext>` files export verb-named handlers.
fn collect_route_file_endpoints(
    file: &crate::extractors::base::FileSymbolRecord,
    endpoints: &mut Vec<ApiEndpoint>,
) {
    let segments: Vec<&str> = file.path.split('/').collect();
    let Some((last, prefix)) = segments.split_last() else {
        return;
    };
    if !last.starts_with("route.") {
        return;
    }

    let route_segments = strip_root_segments(prefix);
    let path = join_route_path(&route_segments);
    let params = bracket_params(&route_segments);

    for function in &file.functions {
        if !function.exported {
            continue;
        }
        let upper = function.name.to_uppercase();
        if HTTP_VERBS.contains(&upper.as_str()) {
            endpoints.push(ApiEndpoint {
                method: upper,
                path: path.clone(),
                file: file.path.clone(),
                handler: function.name.clone(),
                params: params.clone(),
                description: function.description.clone(),
            });
        }
    }
}

/// Rule 2: files under an `api/` directory exporting `default` or `handler`
/// contribute one `ALL` endpoint; the verb is not discriminable from file
/// shape alone.
fn collect_api_dir_endpoints(
    file: &crate::extractors::base::FileSymbolRecord,
    endpoints: &mut Vec<ApiEndpoint>,
) {
    let segments: Vec<&str> = file.path.split('/').collect();
    if !segments[..segments.len().saturating_sub(1)]
        .iter()
        .any(|s| *s == "api")
    {
        return;
    }

    let handler = if file.exports.iter().any(|e| e == "handler")
        && file.functions.iter().any(|f| f.name == "handler")
    {
        "handler"
    } else if file.exports.iter().any(|e| e == "default") {
        "default"
    } else {
        return;
    };

    let Some((last, prefix)) = segments.split_last() else {
        return;
    };
    let stem = last.rsplit_once('.').map(|(s, _)| s).unwrap_or(last);

    let mut route_segments = strip_root_segments(prefix);
    if stem != "index" && stem != "route" {
        route_segments.push(stem.to_string());
    }
    let path = join_route_path(&route_segments);
    let params = bracket_params(&route_segments);

    endpoints.push(ApiEndpoint {
        method: "ALL".to_string(),
        path,
        file: file.path.clone(),
        handler: handler.to_string(),
        params,
        description: None,
    });
}

/// Rule 3: `<identifier>.<verb>(...)` call sites register an endpoint with
/// an unresolved placeholder path.
fn collect_registration_endpoints(
    file: &crate::extractors::base::FileSymbolRecord,
    endpoints: &mut Vec<ApiEndpoint>,
) {
    for function in &file.functions {
        for site in &function.call_sites {
            let Some(caps) = REGISTRATION_RE.captures(site) else {
                continue;
            };
            endpoints.push(ApiEndpoint {
                method: caps[1].to_uppercase(),
                path: UNRESOLVED_PATH.to_string(),
                file: file.path.clone(),
                handler: function.name.clone(),
                params: Vec::new(),
                description: None,
            });
        }
    }
}

fn strip_root_segments(segments: &[&str]) -> Vec<String> {
    let mut start = 0;
    while start < segments.len() && ROOT_SEGMENTS.contains(&segments[start]) {
        start += 1;
    }
    segments[start..].iter().map(|s| s.to_string()).collect()
}

fn join_route_path(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

/// `[name]` segments declare route parameters.
fn bracket_params(segments: &[String]) -> Vec<String> {
    segments
        .iter()
        .filter_map(|s| {
            s.strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{FileSymbolRecord, FunctionSymbol};
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

    #[test]
    fn test_route_file_verb_exports() {
        let mut file = FileSymbolRecord::empty("app/api/users/[id]/route.ts", 1, "TypeScript");
        file.functions.push(function("GET", true, &[]));
        file.functions.push(function("DELETE", true, &[]));
        file.functions.push(function("buildQuery", true, &[]));
        file.exports = vec!["GET".into(), "DELETE".into(), "buildQuery".into()];

        let map = build(&assemble(vec![file]));
        let get = map
            .endpoints
            .iter()
            .find(|e| e.method == "GET")
            .expect("GET endpoint");
        assert_eq!(get.path, "/api/users/[id]");
        assert_eq!(get.handler, "GET");
        assert_eq!(get.params, vec!["id"]);
        assert!(map.endpoints.iter().any(|e| e.method == "DELETE"));
        assert!(
            !map.endpoints.iter().any(|e| e.handler == "buildQuery"),
            "non-verb exports are not endpoints"
        );
    }

    #[test]
    fn test_unexported_verb_functions_do_not_register() {
        let mut file = FileSymbolRecord::empty("app/api/ping/route.ts", 1, "TypeScript");
        file.functions.push(function("GET", false, &[]));
        let map = build(&assemble(vec![file]));
        assert!(map.endpoints.is_empty());
    }

    #[test]
    fn test_api_directory_handler_file() {
        let mut file = FileSymbolRecord::empty("pages/api/users/[id].ts", 1, "TypeScript");
        file.functions.push(function("handler", true, &[]));
        file.exports = vec!["default".into(), "handler".into()];

        let map = build(&assemble(vec![file]));
        assert_eq!(map.endpoints.len(), 1);
        let endpoint = &map.endpoints[0];
        assert_eq!(endpoint.method, "ALL");
        assert_eq!(endpoint.path, "/api/users/[id]");
        assert_eq!(endpoint.handler, "handler");
        assert_eq!(endpoint.params, vec!["id"]);
    }

    #[test]
    fn test_api_directory_index_file_keeps_directory_path() {
        let mut file = FileSymbolRecord::empty("src/api/health/index.ts", 1, "TypeScript");
        file.exports = vec!["default".into()];

        let map = build(&assemble(vec![file]));
        assert_eq!(map.endpoints.len(), 1);
        assert_eq!(map.endpoints[0].path, "/api/health");
        assert_eq!(map.endpoints[0].handler, "default");
    }

    #[test]
    fn test_registration_style_call_sites() {
        let mut file = FileSymbolRecord::empty("src/server.ts", 1, "TypeScript");
        file.functions.push(function(
            "mountRoutes",
            true,
            &["router.get", "router.post", "app.listen", "fetch"],
        ));

        let map = build(&assemble(vec![file]));
        let methods: Vec<&str> = map.endpoints.iter().map(|e| e.method.as_str()).collect();
        assert_eq!(methods, vec!["GET", "POST"]);
        assert_eq!(map.endpoints[0].path, "(unresolved)");
        assert_eq!(map.endpoints[0].handler, "mountRoutes");
    }

    #[test]
    fn test_rules_are_additive() {
        // A route file whose handler also registers routes matches rule 1
        // and rule 3 at once.
        let mut file = FileSymbolRecord::empty("app/api/jobs/route.ts", 1, "TypeScript");
        file.functions
            .push(function("POST", true, &["queue.post"]));
        file.exports = vec!["POST".into()];

        let map = build(&assemble(vec![file]));
        assert_eq!(map.endpoints.len(), 2);
    }
}
