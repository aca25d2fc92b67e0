//! Class/Interface Relationship Builder
//!
//! Derives class and interface nodes plus extends/implements/uses edges from
//! the index. Heritage names that resolve to nothing known are dropped
//! silently; `uses` edges come from a deny-listed scan of method return
//! types and property types for capitalized identifier-shaped tokens. The
//! token scan sits behind `TypeNameResolver` so a sound type-aware resolver
//! can replace it without touching the builder.

use crate::index::ProjectIndex;
use crate::maps::types::{
    class_id, interface_id, ClassMap, ClassNode, ClassRelationship, InterfaceNode, RelationKind,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TYPE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][A-Za-z0-9_]*").unwrap());

/// Common built-in and generic type names excluded from the uses-scan.
const TYPE_NAME_DENY_LIST: &[&str] = &[
    "String", "Number", "Boolean", "Object", "Array", "Function", "Symbol", "Promise", "Date",
    "RegExp", "Error", "Map", "Set", "WeakMap", "WeakSet", "Record", "Partial", "Required",
    "Readonly", "Pick", "Omit", "Exclude", "Extract", "NonNullable", "ReturnType", "Parameters",
    "Awaited", "React", "JSX", "List", "Dict", "Optional", "Union", "Tuple", "Callable", "Type",
    "T", "K", "V", "U", "E", "R",
];

/// Resolves capitalized tokens in type strings to known class/interface ids.
struct TypeNameResolver {
    classes: HashSet<String>,
    interfaces: HashSet<String>,
}

impl TypeNameResolver {
    fn from_index(index: &ProjectIndex) -> Self {
        let mut classes = HashSet::new();
        let mut interfaces = HashSet::new();
        for file in &index.files {
            for class in &file.classes {
                classes.insert(class.name.clone());
            }
            for ty in &file.types {
                if matches!(ty.kind, crate::extractors::base::TypeKind::Interface) {
                    interfaces.insert(ty.name.clone());
                }
            }
        }
        Self {
            classes,
            interfaces,
        }
    }

    fn known_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    fn known_interface(&self, name: &str) -> bool {
        self.interfaces.contains(name)
    }

    /// Ids of known types referenced by a type expression, deny-list applied.
    fn referenced_ids(&self, type_text: &str, exclude: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for token in TYPE_TOKEN_RE.find_iter(type_text) {
            let token = token.as_str();
            if token == exclude || TYPE_NAME_DENY_LIST.contains(&token) {
                continue;
            }
            if self.known_class(token) {
                ids.push(class_id(token));
            } else if self.known_interface(token) {
                ids.push(interface_id(token));
            }
        }
        ids
    }
}

/// Build the class map from the full index.
pub fn build(index: &ProjectIndex) -> ClassMap {
    let resolver = TypeNameResolver::from_index(index);

    let mut classes: Vec<ClassNode> = Vec::new();
    let mut interfaces: Vec<InterfaceNode> = Vec::new();
    let mut seen_class_ids: HashSet<String> = HashSet::new();
    let mut seen_interface_ids: HashSet<String> = HashSet::new();

    let mut relationships: Vec<ClassRelationship> = Vec::new();
    let mut seen_edges: HashSet<(String, String, RelationKind)> = HashSet::new();
    let mut push_edge =
        |edges: &mut Vec<ClassRelationship>, from: String, to: String, kind: RelationKind| {
            if seen_edges.insert((from.clone(), to.clone(), kind)) {
                edges.push(ClassRelationship { from, to, kind });
            }
        };

    for file in &index.files {
        for class in &file.classes {
            let id = class_id(&class.name);

            // Heritage resolves only against known names; external bases
            // are dropped, not errors.
            let extends = class
                .extends
                .as_deref()
                .filter(|base| resolver.known_class(base))
                .map(str::to_string);
            let implements: Vec<String> = class
                .implements
                .iter()
                .filter(|name| resolver.known_interface(name))
                .cloned()
                .collect();

            if let Some(base) = &extends {
                push_edge(
                    &mut relationships,
                    id.clone(),
                    class_id(base),
                    RelationKind::Extends,
                );
            }
            for iface in &implements {
                push_edge(
                    &mut relationships,
                    id.clone(),
                    interface_id(iface),
                    RelationKind::Implements,
                );
            }

            // Uses-edges from member type references.
            let mut type_texts: Vec<&str> = Vec::new();
            for method in &class.methods {
                if let Some(rt) = &method.return_type {
                    type_texts.push(rt);
                }
            }
            for property in &class.properties {
                if let Some(pt) = &property.prop_type {
                    type_texts.push(pt);
                }
            }
            for text in type_texts {
                for target in resolver.referenced_ids(text, &class.name) {
                    push_edge(&mut relationships, id.clone(), target, RelationKind::Uses);
                }
            }

            // First occurrence of a name wins as the canonical node.
            if seen_class_ids.insert(id.clone()) {
                classes.push(ClassNode {
                    id,
                    name: class.name.clone(),
                    file: file.path.clone(),
                    extends,
                    implements,
                    methods: class.methods.iter().map(|m| m.name.clone()).collect(),
                    description: class.description.clone(),
                });
            }
        }

        for ty in &file.types {
            if !matches!(ty.kind, crate::extractors::base::TypeKind::Interface) {
                continue;
            }
            let id = interface_id(&ty.name);
            if seen_interface_ids.insert(id.clone()) {
                interfaces.push(InterfaceNode {
                    id,
                    name: ty.name.clone(),
                    file: file.path.clone(),
                    fields: ty.fields.clone(),
                });
            }
        }
    }

    ClassMap {
        classes,
        interfaces,
        relationships,
    }
}
