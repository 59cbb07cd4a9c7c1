//! Progress checkpointing.
//!
//! The progress set records which input file names have already been
//! processed so a rerun skips finished work. Membership is monotonic
//! within a run: once a name is added it is never removed.
//!
//! The store is injected into the runner as a trait object, so tests can
//! substitute doubles that record calls or fail on demand.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{DocuscanError, Result};

/// Persistence seam for the progress set.
///
/// `save` receives the full set and rewrites the checkpoint wholesale;
/// there is no incremental append. The write is not atomic: a crash
/// mid-write can truncate the file and lose all progress. This is an
/// accepted limitation.
pub trait ProgressStore: Send + Sync {
    /// Read the checkpoint. A missing checkpoint is "no progress yet" and
    /// loads as the empty set; malformed content propagates as a parse
    /// failure.
    fn load(&self) -> Result<BTreeSet<String>>;

    /// Overwrite the checkpoint with the full set.
    fn save(&self, processed: &BTreeSet<String>) -> Result<()>;
}

/// Flat-file store: a human-readable JSON array of file names.
///
/// `BTreeSet` iteration keeps the persisted order deterministic, which
/// matters only for test ergonomics, not correctness.
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> Result<BTreeSet<String>> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(DocuscanError::Io)?;
        let names: Vec<String> = serde_json::from_str(&content)?;
        Ok(names.into_iter().collect())
    }

    fn save(&self, processed: &BTreeSet<String>) -> Result<()> {
        let names: Vec<&String> = processed.iter().collect();
        let json = serde_json::to_string_pretty(&names)?;
        std::fs::write(&self.path, json).map_err(DocuscanError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_checkpoint_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonProgressStore::new(dir.path().join("ocr_progress.json"));

        let set = store.load().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonProgressStore::new(dir.path().join("ocr_progress.json"));

        let mut set = BTreeSet::new();
        set.insert("doc1.png".to_string());
        set.insert("doc2.jpg".to_string());
        store.save(&set).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let store = JsonProgressStore::new(dir.path().join("ocr_progress.json"));

        let mut first = BTreeSet::new();
        first.insert("a.png".to_string());
        store.save(&first).unwrap();

        let mut second = first.clone();
        second.insert("b.png".to_string());
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn test_persisted_format_is_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr_progress.json");
        let store = JsonProgressStore::new(&path);

        let mut set = BTreeSet::new();
        set.insert("b.png".to_string());
        set.insert("a.png".to_string());
        store.save(&set).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let names: Vec<String> = serde_json::from_str(&content).unwrap();
        // BTreeSet order: deterministic, sorted
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_corrupt_checkpoint_propagates_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr_progress.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonProgressStore::new(&path);
        let result = store.load();
        assert!(matches!(result, Err(DocuscanError::Serialization { .. })));
    }

    #[test]
    fn test_wrong_shape_checkpoint_is_parse_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocr_progress.json");
        std::fs::write(&path, r#"{"processed": ["a.png"]}"#).unwrap();

        let store = JsonProgressStore::new(&path);
        assert!(store.load().is_err());
    }
}
