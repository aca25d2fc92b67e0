//! TypeScript/JavaScript family symbol extractor
//!
//! Grammar-aware extraction for `.ts`, `.tsx`, `.js`, `.jsx`, `.mjs` and
//! `.cjs` files through tree-sitter. The architecture is organized into
//! specialized modules:
//!
//! - **symbols**: top-level declaration walk and symbol routing
//! - **functions**: function extraction with params, call sites, nesting,
//!   and the UI-component heuristic
//! - **classes**: class extraction with extends/implements heritage
//! - **interfaces**: interface, type alias, and enum extraction
//! - **imports_exports**: import/export statement extraction
//! - **helpers**: node text, doc comments, type annotation utilities

mod classes;
mod functions;
mod helpers;
mod imports_exports;
mod interfaces;
mod symbols;

use crate::extractors::base::FileSymbolRecord;
use crate::language::Language;
use tree_sitter::Tree;

/// Main TS/JS extractor that orchestrates the modular extraction components.
pub struct TypeScriptExtractor {
    content: String,
    record: FileSymbolRecord,
}

impl TypeScriptExtractor {
    pub fn new(language: Language, path: String, size: u64, content: String) -> Self {
        let record = FileSymbolRecord::empty(path, size, language.label());
        Self { content, record }
    }

    /// Walk the parsed tree and produce the file's symbol record.
    pub fn extract(mut self, tree: &Tree) -> FileSymbolRecord {
        symbols::extract_symbols(&mut self, tree);
        self.record
    }

    // ========================================================================
    // Access for sub-modules
    // ========================================================================

    pub(super) fn content(&self) -> &str {
        &self.content
    }

    pub(super) fn record_mut(&mut self) -> &mut FileSymbolRecord {
        &mut self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_tree_sitter_language;

    fn extract_ts(content: &str) -> FileSymbolRecord {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&get_tree_sitter_language(Language::TypeScript).unwrap())
            .unwrap();
        let tree = parser.parse(content, None).unwrap();
        TypeScriptExtractor::new(
            Language::TypeScript,
            "src/sample.ts".to_string(),
            content.len() as u64,
            content.to_string(),
        )
        .extract(&tree)
    }

    fn extract_tsx(content: &str) -> FileSymbolRecord {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&get_tree_sitter_language(Language::Tsx).unwrap())
            .unwrap();
        let tree = parser.parse(content, None).unwrap();
        TypeScriptExtractor::new(
            Language::Tsx,
            "src/sample.tsx".to_string(),
            content.len() as u64,
            content.to_string(),
        )
        .extract(&tree)
    }

    #[test]
    fn test_function_declaration_with_types() {
        let record = extract_ts(
            "export async function loadUser(id: string, force: boolean): Promise<User> {\n  return fetchUser(id);\n}\n",
        );
        assert_eq!(record.functions.len(), 1);
        let f = &record.functions[0];
        assert_eq!(f.name, "loadUser");
        assert!(f.exported);
        assert!(f.is_async);
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0].name, "id");
        assert_eq!(f.params[0].param_type.as_deref(), Some("string"));
        assert_eq!(f.return_type.as_deref(), Some("Promise<User>"));
        assert!(f.call_sites.contains(&"fetchUser".to_string()));
        assert!(record.exports.contains(&"loadUser".to_string()));
    }

    #[test]
    fn test_class_with_heritage_and_members() {
        let record = extract_ts(
            r#"
/** Persists users. */
export class UserRepo extends BaseRepo implements Repository, Disposable {
  private cache: Map<string, User>;

  findById(id: string): User {
    return this.cache.get(id);
  }
}
"#,
        );
        assert_eq!(record.classes.len(), 1);
        let c = &record.classes[0];
        assert_eq!(c.name, "UserRepo");
        assert!(c.exported);
        assert_eq!(c.extends.as_deref(), Some("BaseRepo"));
        assert_eq!(c.implements, vec!["Repository", "Disposable"]);
        assert_eq!(c.methods.len(), 1);
        assert_eq!(c.methods[0].name, "findById");
        assert_eq!(c.methods[0].return_type.as_deref(), Some("User"));
        assert_eq!(c.properties.len(), 1);
        assert_eq!(c.properties[0].name, "cache");
        assert_eq!(
            c.properties[0].prop_type.as_deref(),
            Some("Map<string, User>")
        );
        assert_eq!(c.description.as_deref(), Some("Persists users."));
    }

    #[test]
    fn test_interface_fields_and_optional_markers() {
        let record = extract_ts(
            "interface User {\n  id: string;\n  email?: string;\n}\n",
        );
        assert_eq!(record.types.len(), 1);
        let t = &record.types[0];
        assert_eq!(t.name, "User");
        assert_eq!(t.fields.len(), 2);
        assert_eq!(t.fields[0].name, "id");
        assert_eq!(t.fields[0].field_type, "string");
        assert!(!t.fields[0].optional);
        assert_eq!(t.fields[1].name, "email");
        assert!(t.fields[1].optional);
    }

    #[test]
    fn test_union_type_alias_flattens_members() {
        let record = extract_ts("export type Status = \"open\" | \"closed\" | \"merged\";\n");
        assert_eq!(record.types.len(), 1);
        let t = &record.types[0];
        assert_eq!(t.values, vec!["\"open\"", "\"closed\"", "\"merged\""]);
        assert!(record.exports.contains(&"Status".to_string()));
    }

    #[test]
    fn test_object_type_alias_captures_fields() {
        let record = extract_ts("type Point = { x: number; y: number };\n");
        let t = &record.types[0];
        assert_eq!(t.fields.len(), 2);
        assert_eq!(t.fields[1].name, "y");
        assert_eq!(t.fields[1].field_type, "number");
    }

    #[test]
    fn test_enum_members() {
        let record = extract_ts("enum Role { Admin, Member = \"member\" }\n");
        let t = &record.types[0];
        assert_eq!(t.values, vec!["Admin", "Member"]);
    }

    #[test]
    fn test_imports_use_local_names() {
        let record = extract_ts(
            "import React from \"react\";\nimport { useState as state, useEffect } from \"react\";\nimport * as path from \"node:path\";\n",
        );
        assert_eq!(record.imports.len(), 3);
        assert_eq!(record.imports[0].names, vec!["React"]);
        assert_eq!(record.imports[1].names, vec!["state", "useEffect"]);
        assert_eq!(record.imports[2].names, vec!["path"]);
        assert_eq!(record.imports[2].source, "node:path");
    }

    #[test]
    fn test_arrow_function_component_detection() {
        let record = extract_tsx(
            "export const Banner = (props: BannerProps) => {\n  return <div>{props.text}</div>;\n};\n",
        );
        assert_eq!(record.functions.len(), 1);
        let f = &record.functions[0];
        assert_eq!(f.name, "Banner");
        assert!(f.is_component, "JSX-returning arrow function is a component");
        assert!(f.exported);
    }

    #[test]
    fn test_component_detection_by_type_annotation() {
        let record = extract_ts(
            "const Header: React.FC<HeaderProps> = (props) => {\n  return render(props);\n};\n",
        );
        let f = &record.functions[0];
        assert!(f.is_component, "component-shaped annotation marks a component");
    }

    #[test]
    fn test_nested_functions_one_level() {
        let record = extract_ts(
            "function outer() {\n  function inner() {\n    function deepest() {}\n  }\n  const helper = () => 1;\n}\n",
        );
        let names: Vec<&str> = record.functions.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"outer"));
        assert!(names.contains(&"outer.inner"));
        assert!(names.contains(&"outer.helper"));
        assert!(
            !names.iter().any(|n| n.contains("deepest")),
            "only one level of nesting is captured"
        );
    }

    #[test]
    fn test_doc_comment_attachment_requires_no_blank_line() {
        let record = extract_ts(
            "/** Attached. */\nfunction documented() {}\n\n/** Detached. */\n\nfunction separated() {}\n",
        );
        let documented = record
            .functions
            .iter()
            .find(|f| f.name == "documented")
            .unwrap();
        assert_eq!(documented.description.as_deref(), Some("Attached."));
        let separated = record
            .functions
            .iter()
            .find(|f| f.name == "separated")
            .unwrap();
        assert!(
            separated.description.is_none(),
            "a blank line breaks doc attachment"
        );
    }

    #[test]
    fn test_file_level_description() {
        let record = extract_ts(
            "/**\n * User management helpers.\n */\n\nexport function noop() {}\n",
        );
        assert_eq!(
            record.description.as_deref(),
            Some("User management helpers.")
        );
    }

    #[test]
    fn test_export_clause_and_reexport() {
        let record = extract_ts(
            "function a() {}\nfunction b() {}\nexport { a, b as c };\nexport { helper } from \"./util\";\n",
        );
        assert!(record.exports.contains(&"a".to_string()));
        assert!(record.exports.contains(&"c".to_string()));
        assert!(record.exports.contains(&"helper".to_string()));
    }

    #[test]
    fn test_default_export_handler() {
        let record = extract_ts("export default function handler(req, res) {}\n");
        assert!(record.exports.contains(&"default".to_string()));
        let f = &record.functions[0];
        assert_eq!(f.name, "handler");
        assert!(f.exported);
    }

    #[test]
    fn test_variables_and_call_sites() {
        let record = extract_ts(
            "export const LIMIT = 50;\nfunction run() {\n  logger.info(\"go\");\n  schedule();\n  schedule();\n}\n",
        );
        assert_eq!(record.variables.len(), 1);
        assert_eq!(record.variables[0].name, "LIMIT");
        assert_eq!(record.variables[0].kind, "const");
        assert!(record.variables[0].exported);
        let f = &record.functions[0];
        assert_eq!(
            f.call_sites,
            vec!["logger.info".to_string(), "schedule".to_string()],
            "call sites are deduplicated in order"
        );
    }
}
