//! List persistence with file locking.
//!
//! All four lists are saved together as one JSON document. Loading tolerates a
//! missing, unreadable or inconsistent file by starting from empty lists.

use crate::{Error, Lists, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// Persistence collaborator: load at startup, save after mutations and on exit
pub trait Store {
    fn load(&self) -> Result<Lists>;
    fn save(&mut self, lists: &Lists) -> Result<()>;
}

/// On-disk document
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    saved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    lists: Lists,
}

/// JSON-file store with atomic replace on save
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the given file, making sure its directory exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                Error::Persistence(format!("data file {:?} has no parent directory", path))
            })?;
        std::fs::create_dir_all(parent)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<String> {
        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;
        Ok(contents)
    }
}

impl Store for JsonStore {
    /// Returns empty lists if the file doesn't exist.
    /// If the file is unreadable, corrupted or has dangling references,
    /// logs a warning and returns empty lists.
    fn load(&self) -> Result<Lists> {
        if !self.path.exists() {
            tracing::info!("No data file at {:?}, starting empty", self.path);
            return Ok(Lists::default());
        }

        let contents = match self.read_contents() {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read data file {:?}: {}. Starting empty.", self.path, e);
                return Ok(Lists::default());
            }
        };

        let snapshot = match serde_json::from_str::<Snapshot>(&contents) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Failed to parse data file {:?}: {}. Starting empty.", self.path, e);
                return Ok(Lists::default());
            }
        };

        if snapshot.version > FORMAT_VERSION {
            tracing::warn!(
                "Data file {:?} has version {}, newer than {}; reading it anyway",
                self.path,
                snapshot.version,
                FORMAT_VERSION
            );
        }

        if let Err(e) = snapshot.lists.validate() {
            tracing::warn!("Data file {:?} is inconsistent: {}. Starting empty.", self.path, e);
            return Ok(Lists::default());
        }

        tracing::info!(
            "Loaded {} exercises, {} workouts, {} plans from {:?}",
            snapshot.lists.exercises.len(),
            snapshot.lists.workouts.len(),
            snapshot.lists.plans.len(),
            self.path
        );
        Ok(snapshot.lists)
    }

    /// Atomically writes by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, lists: &Lists) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            Error::Persistence(format!("data file {:?} has no parent directory", self.path))
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let snapshot = Snapshot {
                version: FORMAT_VERSION,
                saved_at: Some(Utc::now()),
                lists: lists.clone(),
            };
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, &snapshot)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved lists to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store, for tests and dry runs
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub saved: Option<Lists>,
    pub saves: usize,
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Lists> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, lists: &Lists) -> Result<()> {
        self.saved = Some(lists.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Day;

    fn populated() -> Lists {
        let mut lists = Lists::new();
        lists.exercises.add("push up").unwrap();
        lists.exercises.add("sit up").unwrap();
        lists.workouts.create(&lists.exercises, 1, 10).unwrap();
        lists.workouts.create(&lists.exercises, 2, 15).unwrap();
        lists
            .plans
            .create(&lists.workouts, "more muscles", vec![1, 2, 1, 2])
            .unwrap();
        lists.schedule.update(1, 1, &lists.plans).unwrap();
        lists
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(temp_dir.path().join("werkit.json")).unwrap();

        let lists = populated();
        store.save(&lists).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, lists);
        assert_eq!(loaded.schedule.plan_on(Day::Monday), Some(1));
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(temp_dir.path().join("nonexistent.json")).unwrap();

        let lists = store.load().unwrap();
        assert!(lists.exercises.is_empty());
        assert!(lists.schedule.is_empty());
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("werkit.json");
        JsonStore::open(&path).unwrap();
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_corrupted_file_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupted.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let store = JsonStore::open(&path).unwrap();
        let lists = store.load().unwrap();
        assert_eq!(lists, Lists::default());
    }

    #[test]
    fn test_dangling_reference_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("dangling.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "exercises": [], "workouts": [{"exercise_index": 1, "reps": 5}]}"#,
        )
        .unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), Lists::default());
    }

    #[test]
    fn test_zero_reps_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("zero_reps.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "exercises": [{"name": "squat"}], "workouts": [{"exercise_index": 1, "reps": 0}]}"#,
        )
        .unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap(), Lists::default());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(temp_dir.path().join("werkit.json")).unwrap();

        store.save(&populated()).unwrap();
        store.save(&Lists::default()).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "werkit.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only werkit.json, found extras: {:?}",
            extras
        );
        // Last successful save wins
        assert_eq!(store.load().unwrap(), Lists::default());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), Lists::default());
        store.save(&populated()).unwrap();
        assert_eq!(store.saves, 1);
        assert_eq!(store.load().unwrap(), populated());
    }
}
