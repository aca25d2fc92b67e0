//! Language Support - Shared language classification and parser configuration
//!
//! This module is the single source of truth for which languages the engine
//! recognizes, how file extensions map onto them, which extraction strategy
//! each language gets, and which directories the walker never descends into.

use anyhow::Result;

/// Languages the engine recognizes.
///
/// Recognition does not imply extraction: the TS/JS family is parsed with
/// tree-sitter, Python and Go get line-oriented heuristic extraction, and the
/// rest contribute size/count totals through empty records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Python,
    Go,
    Rust,
    Java,
    Ruby,
    CSharp,
    Cpp,
    C,
    Swift,
    Php,
    Kotlin,
}

/// How a language's symbols are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Grammar-aware extraction through a tree-sitter parser.
    Grammar,
    /// Line-oriented heuristic extraction with regex rules.
    Heuristic,
    /// Recognized extension, no extraction rule: empty records only.
    None,
}

impl Language {
    /// Human-readable label used in records and the tech stack.
    pub fn label(&self) -> &'static str {
        match self {
            Language::TypeScript | Language::Tsx => "TypeScript",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Java => "Java",
            Language::Ruby => "Ruby",
            Language::CSharp => "C#",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Swift => "Swift",
            Language::Php => "PHP",
            Language::Kotlin => "Kotlin",
        }
    }

    /// Extraction strategy dispatch. New languages get a new variant here,
    /// not a subclass anywhere.
    pub fn strategy(&self) -> ExtractionStrategy {
        match self {
            Language::TypeScript | Language::Tsx | Language::JavaScript => {
                ExtractionStrategy::Grammar
            }
            Language::Python | Language::Go => ExtractionStrategy::Heuristic,
            _ => ExtractionStrategy::None,
        }
    }
}

/// Detect language from a file extension (without the leading dot).
pub fn detect_language_from_extension(extension: &str) -> Option<Language> {
    match extension {
        "ts" => Some(Language::TypeScript),
        "tsx" => Some(Language::Tsx),
        "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
        "py" => Some(Language::Python),
        "go" => Some(Language::Go),
        "rs" => Some(Language::Rust),
        "java" => Some(Language::Java),
        "rb" => Some(Language::Ruby),
        "cs" => Some(Language::CSharp),
        "cpp" | "cc" | "hpp" => Some(Language::Cpp),
        "c" | "h" => Some(Language::C),
        "swift" => Some(Language::Swift),
        "php" => Some(Language::Php),
        "kt" => Some(Language::Kotlin),
        _ => None,
    }
}

/// Get the tree-sitter grammar for a grammar-parsed language.
///
/// Only the TS/JS family has a parser wired in; asking for any other
/// language is a caller bug and reports an error rather than panicking.
pub fn get_tree_sitter_language(language: Language) -> Result<tree_sitter::Language> {
    match language {
        Language::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        Language::Tsx => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        Language::JavaScript => Ok(tree_sitter_javascript::LANGUAGE.into()),
        other => Err(anyhow::anyhow!(
            "No tree-sitter grammar wired for language: {}",
            other.label()
        )),
    }
}

/// Directory names the walker never descends into.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "__pycache__",
    ".cache",
    ".vscode",
    ".idea",
    "coverage",
    ".weaver",
    ".turbo",
    ".output",
    "vendor",
    "target",
    "bin",
    "obj",
    ".gradle",
    ".mvn",
    "venv",
    ".venv",
    "env",
];

/// Files larger than this are never read or extracted.
pub const MAX_FILE_SIZE: u64 = 500 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_js_family_maps_to_grammar_strategy() {
        for ext in ["ts", "tsx", "js", "jsx", "mjs", "cjs"] {
            let lang = detect_language_from_extension(ext).unwrap();
            assert_eq!(
                lang.strategy(),
                ExtractionStrategy::Grammar,
                "{} should be grammar-parsed",
                ext
            );
        }
    }

    #[test]
    fn test_python_and_go_are_heuristic() {
        assert_eq!(
            detect_language_from_extension("py").unwrap().strategy(),
            ExtractionStrategy::Heuristic
        );
        assert_eq!(
            detect_language_from_extension("go").unwrap().strategy(),
            ExtractionStrategy::Heuristic
        );
    }

    #[test]
    fn test_recognized_but_unextracted_extensions() {
        for ext in [
            "rs", "java", "rb", "cs", "cpp", "cc", "c", "h", "hpp", "swift", "php", "kt",
        ] {
            let lang = detect_language_from_extension(ext)
                .unwrap_or_else(|| panic!("{} should be recognized", ext));
            assert_eq!(lang.strategy(), ExtractionStrategy::None);
        }
    }

    #[test]
    fn test_unknown_extension_is_not_recognized() {
        assert!(detect_language_from_extension("zig").is_none());
        assert!(detect_language_from_extension("").is_none());
    }

    #[test]
    fn test_grammar_lookup_rejects_heuristic_languages() {
        assert!(get_tree_sitter_language(Language::TypeScript).is_ok());
        assert!(get_tree_sitter_language(Language::Python).is_err());
    }
}
