//! Engine orchestrator
//!
//! One build is a synchronous batch pass: walk the repository, extract every
//! file in parallel, assemble the ProjectIndex, then derive the four code
//! maps. There is no internal shared mutable state; re-running a build over
//! the same tree produces set-equal maps.

use crate::error::Result;
use crate::extractors;
use crate::index::{assemble, ProjectIndex};
use crate::maps::{build_bundle, CodeMapBundle};
use crate::walker;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The codebase intelligence engine, rooted at one repository.
pub struct Engine {
    root: PathBuf,
}

impl Engine {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the repository and build a fresh ProjectIndex.
    ///
    /// Oversized files are counted out before extraction; a file whose
    /// content cannot be read or parsed yields an empty record and never
    /// aborts the build.
    pub fn build_index(&self) -> Result<ProjectIndex> {
        let walked = walker::walk(&self.root)?;
        let (oversized, eligible): (Vec<_>, Vec<_>) =
            walked.into_iter().partition(|f| f.oversized);
        for file in &oversized {
            debug!("Skipping oversized file ({} bytes): {}", file.size, file.path);
        }

        let records: Vec<_> = eligible
            .par_iter()
            .map(|file| {
                let content = match fs::read(self.root.join(&file.path)) {
                    Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
                    Err(e) => {
                        warn!("Failed to read {}, emitting empty record: {}", file.path, e);
                        return extractors::base::FileSymbolRecord::empty(
                            &file.path,
                            file.size,
                            file.language.label(),
                        );
                    }
                };
                extractors::extract(&file.path, file.size, &content, file.language)
            })
            .collect();

        let index = assemble(records);
        debug!(
            "Indexed {} files: {} functions, {} classes, {} types",
            index.total_files, index.total_functions, index.total_classes, index.total_types
        );
        Ok(index)
    }

    /// Derive the four code maps from an index.
    ///
    /// The builders are read-only over the same index and independent; the
    /// bundle replaces any previous one wholesale.
    pub fn build_code_maps(&self, index: &ProjectIndex) -> CodeMapBundle {
        build_bundle(index)
    }
}
