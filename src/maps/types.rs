// Data structures for the four derived code maps.
//
// Node identity is deliberately name-qualified, not file-qualified: class
// and interface ids are a value produced by the id helpers here, so a future
// file-qualified scheme is a localized change. The bundle is the single
// artifact downstream collaborators consume and is replaced wholesale on
// every build.

use crate::extractors::base::TypeField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of a class node. Name-qualified only; the first declaration of a name
/// is the canonical node (documented limitation).
pub fn class_id(name: &str) -> String {
    format!("c:{}", name)
}

/// Id of an interface node. Same identity rule as classes.
pub fn interface_id(name: &str) -> String {
    format!("i:{}", name)
}

/// Id of a module node, one per source directory.
pub fn module_id(dir: &str) -> String {
    format!("mod:{}", dir)
}

/// Id of a call graph node, qualified by file and function name.
pub fn function_id(file: &str, name: &str) -> String {
    format!("f:{}:{}", file, name)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassNode {
    pub id: String,
    pub name: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    pub methods: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceNode {
    pub id: String,
    pub name: String,
    pub file: String,
    pub fields: Vec<TypeField>,
}

/// Kind of a class relationship edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Extends,
    Implements,
    Uses,
}

/// One edge of the class map, deduplicated by the full triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRelationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassMap {
    pub classes: Vec<ClassNode>,
    pub interfaces: Vec<InterfaceNode>,
    pub relationships: Vec<ClassRelationship>,
}

/// A module is a directory of source files, not a language construct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    pub id: String,
    /// Directory path; `.` for the repository root.
    pub path: String,
    pub files: Vec<String>,
    /// Union of the member files' exports.
    pub exports: Vec<String>,
    /// Exported function/class names, capped at 20 entries.
    pub public_api: Vec<String>,
}

/// One ordered module pair with at least one resolved cross-module import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConnection {
    pub from: String,
    pub to: String,
    pub imports: usize,
    pub exports_used: Vec<String>,
}

/// One architectural layer bucket, assigned purely from connectivity degree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    pub name: String,
    pub modules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMap {
    pub modules: Vec<ModuleNode>,
    pub connections: Vec<ModuleConnection>,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallNode {
    pub id: String,
    pub name: String,
    pub file: String,
    pub exported: bool,
    /// Ids of functions this one calls.
    pub calls: Vec<String>,
    /// Ids of functions observed calling this one.
    pub called_by: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CallGraph {
    pub functions: Vec<CallNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    pub file: String,
    pub handler: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMap {
    pub endpoints: Vec<ApiEndpoint>,
}

/// The single artifact consumed by downstream collaborators. Produced once
/// per build from one immutable ProjectIndex; never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeMapBundle {
    pub class_map: ClassMap,
    pub module_map: ModuleMap,
    pub call_graph: CallGraph,
    pub api_map: ApiMap,
    pub generated_at: DateTime<Utc>,
}
