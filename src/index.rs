//! Project Index Assembler
//!
//! Aggregates all per-file symbol records into one ProjectIndex with
//! repository-wide totals, the distinct tech stack, and a nested file tree.
//! The index is built once per run and replaced wholesale on re-index; there
//! is no partial merge.

use crate::extractors::base::FileSymbolRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a file tree node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileTreeKind {
    Directory,
    File,
}

/// One node of the nested file tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    pub kind: FileTreeKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub children: Vec<FileTreeNode>,
}

/// The flat per-file symbol table plus repository-wide aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIndex {
    pub files: Vec<FileSymbolRecord>,
    pub file_tree: FileTreeNode,
    pub total_files: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_variables: usize,
    pub total_types: usize,
    /// Distinct language labels seen, sorted.
    pub tech_stack: Vec<String>,
    pub indexed_at: DateTime<Utc>,
}

/// Build a ProjectIndex from extracted records.
pub fn assemble(files: Vec<FileSymbolRecord>) -> ProjectIndex {
    let total_functions = files.iter().map(|f| f.functions.len()).sum();
    let total_classes = files.iter().map(|f| f.classes.len()).sum();
    let total_variables = files.iter().map(|f| f.variables.len()).sum();
    let total_types = files.iter().map(|f| f.types.len()).sum();

    let mut tech_stack: Vec<String> = files.iter().map(|f| f.language.clone()).collect();
    tech_stack.sort();
    tech_stack.dedup();

    let file_tree = build_file_tree(&files);

    ProjectIndex {
        total_files: files.len(),
        total_functions,
        total_classes,
        total_variables,
        total_types,
        tech_stack,
        file_tree,
        files,
        indexed_at: Utc::now(),
    }
}

/// Build the nested directory tree from the flat record list.
fn build_file_tree(files: &[FileSymbolRecord]) -> FileTreeNode {
    let mut root = DirBuilder::default();
    for record in files {
        let segments: Vec<&str> = record.path.split('/').collect();
        root.insert(&segments, record.size);
    }
    root.into_node(".".to_string(), String::new())
}

#[derive(Default)]
struct DirBuilder {
    dirs: BTreeMap<String, DirBuilder>,
    files: BTreeMap<String, u64>,
}

impl DirBuilder {
    fn insert(&mut self, segments: &[&str], size: u64) {
        match segments {
            [] => {}
            [file] => {
                self.files.insert((*file).to_string(), size);
            }
            [dir, rest @ ..] => {
                self.dirs
                    .entry((*dir).to_string())
                    .or_default()
                    .insert(rest, size);
            }
        }
    }

    fn into_node(self, name: String, path: String) -> FileTreeNode {
        let mut children = Vec::new();
        for (dir_name, builder) in self.dirs {
            let child_path = if path.is_empty() {
                dir_name.clone()
            } else {
                format!("{}/{}", path, dir_name)
            };
            children.push(builder.into_node(dir_name, child_path));
        }
        for (file_name, size) in self.files {
            let child_path = if path.is_empty() {
                file_name.clone()
            } else {
                format!("{}/{}", path, file_name)
            };
            children.push(FileTreeNode {
                name: file_name,
                path: child_path,
                kind: FileTreeKind::File,
                size: Some(size),
                children: Vec::new(),
            });
        }
        FileTreeNode {
            name,
            path,
            kind: FileTreeKind::Directory,
            size: None,
            children,
        }
    }
}
