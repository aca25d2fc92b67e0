//! Source Walker - repository file enumeration
//!
//! Walks a root directory, skipping the fixed build/dependency/VCS skip-set,
//! and classifies each file's language by extension. Unrecognized extensions
//! are not yielded at all; oversized files are yielded with a marker so the
//! engine can count them out without ever reading them.

use crate::error::Result;
use crate::language::{detect_language_from_extension, Language, MAX_FILE_SIZE, SKIP_DIRS};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One file found by the walk.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Repo-relative Unix-style path.
    pub path: String,
    pub size: u64,
    pub language: Language,
    /// True when the file exceeds the extraction size threshold.
    pub oversized: bool,
}

/// Enumerate recognized source files under `root`, sorted by path.
pub fn walk(root: &Path) -> Result<Vec<WalkedFile>> {
    let mut files = Vec::new();
    walk_dir(root, root, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("Walked {} source files under {}", files.len(), root.display());
    Ok(files)
}

fn walk_dir(root: &Path, dir: &Path, files: &mut Vec<WalkedFile>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_dir(root, &path, files)?;
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let Some(language) = detect_language_from_extension(extension) else {
            continue;
        };

        let size = entry.metadata()?.len();
        files.push(WalkedFile {
            path: relative_unix_path(root, &path),
            size,
            language,
            oversized: size > MAX_FILE_SIZE,
        });
    }
    Ok(())
}

/// Convert an absolute path into a repo-relative Unix-style path.
fn relative_unix_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
