// Data structures for per-file symbol extraction.
//
// One FileSymbolRecord per indexed file, keyed by repo-relative path.
// Records are immutable once produced and serialize to camelCase JSON so the
// Project Index is a stable wire artifact.

use serde::{Deserialize, Serialize};

/// A function or method parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub param_type: Option<String>,
}

/// A free function, or a function value bound to a variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSymbol {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_type: Option<String>,
    pub exported: bool,
    /// 1-based line of the declaration.
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_async: bool,
    /// Heuristic UI-component flag, not guaranteed precise.
    #[serde(default)]
    pub is_component: bool,
    /// Textual callee names observed in the body. Consumed only by the call
    /// graph builder.
    #[serde(default)]
    pub call_sites: Vec<String>,
}

/// A method attached to a class symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MethodSymbol {
    pub name: String,
    pub params: Vec<Param>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// A property attached to a class symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertySymbol {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub prop_type: Option<String>,
}

/// A class (or struct, for receiver-based languages).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassSymbol {
    pub name: String,
    pub methods: Vec<MethodSymbol>,
    pub properties: Vec<PropertySymbol>,
    pub exported: bool,
    pub line: u32,
    /// Base class name as written in source; resolution happens later.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Kind of a type symbol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Interface,
    Type,
    Enum,
}

/// A named field of an interface or object-shaped type alias.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub optional: bool,
}

/// An interface, type alias, or enum.
///
/// Union-valued type aliases flatten into `values`; object-shaped aliases
/// and interfaces carry `fields`; enums carry their members in `values`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeSymbol {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Vec<TypeField>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// A top-level variable declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VariableSymbol {
    pub name: String,
    /// Declaration keyword as written (`const`, `let`, `var`, ...).
    pub kind: String,
    pub line: u32,
    pub exported: bool,
}

/// One import statement: the source specifier and the local bound names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRecord {
    pub source: String,
    pub names: Vec<String>,
}

/// Per-file symbol table. Owned exclusively by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileSymbolRecord {
    /// Repo-relative Unix-style path. Unique within an index.
    pub path: String,
    pub size: u64,
    pub language: String,
    /// File-level doc comment, when one leads the file.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub functions: Vec<FunctionSymbol>,
    pub classes: Vec<ClassSymbol>,
    pub variables: Vec<VariableSymbol>,
    pub types: Vec<TypeSymbol>,
    /// Names this file exports.
    pub exports: Vec<String>,
    pub imports: Vec<ImportRecord>,
}

impl FileSymbolRecord {
    /// An empty-but-valid record. Used for recognized-but-unextracted
    /// languages and for files whose extraction failed; the file still
    /// contributes size and count totals without aborting the build.
    pub fn empty(path: impl Into<String>, size: u64, language: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size,
            language: language.into(),
            description: None,
            functions: Vec::new(),
            classes: Vec::new(),
            variables: Vec::new(),
            types: Vec::new(),
            exports: Vec::new(),
            imports: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_is_valid_and_countable() {
        let record = FileSymbolRecord::empty("src/lib.rs", 1024, "Rust");
        assert_eq!(record.path, "src/lib.rs");
        assert_eq!(record.size, 1024);
        assert!(record.functions.is_empty());
        assert!(record.imports.is_empty());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut record = FileSymbolRecord::empty("src/app.ts", 10, "TypeScript");
        record.functions.push(FunctionSymbol {
            name: "loadUser".to_string(),
            params: vec![Param {
                name: "id".to_string(),
                param_type: Some("string".to_string()),
            }],
            return_type: Some("Promise<User>".to_string()),
            exported: true,
            line: 3,
            description: None,
            is_async: true,
            is_component: false,
            call_sites: vec!["fetch".to_string()],
        });

        let json = serde_json::to_value(&record).unwrap();
        let function = &json["functions"][0];
        assert_eq!(function["returnType"], "Promise<User>");
        assert_eq!(function["isAsync"], true);
        assert_eq!(function["callSites"][0], "fetch");
        assert_eq!(function["params"][0]["type"], "string");
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let mut record = FileSymbolRecord::empty("src/models.ts", 99, "TypeScript");
        record.types.push(TypeSymbol {
            name: "Role".to_string(),
            kind: TypeKind::Enum,
            fields: Vec::new(),
            values: vec!["Admin".to_string(), "Member".to_string()],
            description: Some("Access roles".to_string()),
        });

        let json = serde_json::to_string(&record).unwrap();
        let back: FileSymbolRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
