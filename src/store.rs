//! Store boundary - the persistence collaborator
//!
//! The engine treats persistence as an opaque store with its own locking and
//! backup discipline; this module only defines the boundary and ships a
//! plain JSON-file implementation for callers that do not bring their own.
//! A missing document reads back as `None`, never as an error.

use crate::error::Result;
use crate::index::ProjectIndex;
use crate::maps::CodeMapBundle;
use std::fs;
use std::path::PathBuf;

/// Persistence boundary for the index and the code map bundle.
pub trait ProjectStore {
    fn read_index(&self) -> Result<Option<ProjectIndex>>;
    fn write_index(&self, index: &ProjectIndex) -> Result<()>;
    fn read_code_maps(&self) -> Result<Option<CodeMapBundle>>;
    fn write_code_maps(&self, bundle: &CodeMapBundle) -> Result<()>;
}

/// JSON-file store: one document per file under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join("index.json")
    }

    fn code_maps_path(&self) -> PathBuf {
        self.dir.join("code_maps.json")
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &PathBuf) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_json<T: serde::Serialize>(&self, path: &PathBuf, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl ProjectStore for JsonFileStore {
    fn read_index(&self) -> Result<Option<ProjectIndex>> {
        self.read_json(&self.index_path())
    }

    fn write_index(&self, index: &ProjectIndex) -> Result<()> {
        self.write_json(&self.index_path(), index)
    }

    fn read_code_maps(&self) -> Result<Option<CodeMapBundle>> {
        self.read_json(&self.code_maps_path())
    }

    fn write_code_maps(&self, bundle: &CodeMapBundle) -> Result<()> {
        self.write_json(&self.code_maps_path(), bundle)
    }
}
