//! Backing stores: persisted workout log, routine book, and draft slots.
//!
//! Each store is one JSON file with file locking and atomic writes. The
//! core mutation and analytics functions never touch these; callers read a
//! snapshot, apply pure transforms, and write the result back. Loads fall
//! back to an empty store when the file is missing or unreadable so a
//! damaged file never wedges the application.

use crate::{Error, Result};
use crate::types::{Routine, Workout};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a JSON-backed store with shared locking.
///
/// Returns the default value if the file doesn't exist.
/// If the file is corrupted, logs a warning and returns the default.
fn load_json<T: DeserializeOwned + Default>(path: &Path, what: &str) -> Result<T> {
    if !path.exists() {
        tracing::info!("No {} file found, starting empty", what);
        return Ok(T::default());
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open {} file {:?}: {}. Starting empty.", what, path, e);
            return Ok(T::default());
        }
    };

    // Acquire shared lock for reading
    if let Err(e) = file.lock_shared() {
        tracing::warn!("Unable to lock {} file {:?}: {}. Starting empty.", what, path, e);
        return Ok(T::default());
    }

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    if let Err(e) = reader.read_to_string(&mut contents) {
        let _ = file.unlock();
        tracing::warn!("Failed to read {} file {:?}: {}. Starting empty.", what, path, e);
        return Ok(T::default());
    }

    file.unlock()?;

    match serde_json::from_str::<T>(&contents) {
        Ok(value) => {
            tracing::debug!("Loaded {} from {:?}", what, path);
            Ok(value)
        }
        Err(e) => {
            tracing::warn!("Failed to parse {} file {:?}: {}. Starting empty.", what, path, e);
            Ok(T::default())
        }
    }
}

/// Save a JSON-backed store with exclusive locking.
///
/// Atomically writes by:
/// 1. Writing to a temp file
/// 2. Syncing to disk
/// 3. Renaming over the original
fn save_json<T: Serialize>(value: &T, path: &Path, what: &str) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Create unique temp file in the same directory for atomic rename
    let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "store path missing parent")
    })?)?;

    // Acquire exclusive lock on the temp file to serialize concurrent writers
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    // Atomically replace the old file
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {} to {:?}", what, path);
    Ok(())
}

// ============================================================================
// Workout Log
// ============================================================================

/// The persisted collection of workouts
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct WorkoutLog {
    pub workouts: Vec<Workout>,
}

impl WorkoutLog {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path, "workout log")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path, "workout log")
    }

    /// Load, modify, and save back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut WorkoutLog) -> Result<()>,
    {
        let mut log = Self::load(path)?;
        f(&mut log)?;
        log.save(path)?;
        Ok(log)
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Insert or replace by id (last write wins)
    pub fn put(&mut self, workout: Workout) {
        match self.workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(slot) => *slot = workout,
            None => self.workouts.push(workout),
        }
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        self.workouts.len() != before
    }

    /// Workouts sorted newest first by date
    pub fn recent_first(&self) -> Vec<&Workout> {
        let mut sorted: Vec<&Workout> = self.workouts.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

// ============================================================================
// Routine Book
// ============================================================================

/// The persisted collection of routines
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct RoutineBook {
    pub routines: Vec<Routine>,
}

impl RoutineBook {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path, "routine book")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path, "routine book")
    }

    /// Load, modify, and save back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut RoutineBook) -> Result<()>,
    {
        let mut book = Self::load(path)?;
        f(&mut book)?;
        book.save(path)?;
        Ok(book)
    }

    pub fn get(&self, id: &str) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == id)
    }

    /// First routine whose name matches, case-insensitively
    pub fn find_by_name(&self, name: &str) -> Option<&Routine> {
        self.routines
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// Insert or replace by id (last write wins)
    pub fn put(&mut self, routine: Routine) {
        match self.routines.iter_mut().find(|r| r.id == routine.id) {
            Some(slot) => *slot = routine,
            None => self.routines.push(routine),
        }
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.routines.len();
        self.routines.retain(|r| r.id != id);
        self.routines.len() != before
    }
}

// ============================================================================
// Draft State
// ============================================================================

/// The two draft slots: the in-progress workout and the routine being built.
///
/// A browser app would hold these in memory for the tab's lifetime; a CLI
/// process is short-lived, so they persist between invocations with the
/// same atomic-save discipline as the collections.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DraftState {
    pub active_workout: Option<Workout>,
    pub routine_draft: Option<Routine>,
}

impl DraftState {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path, "draft state")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path, "draft state")
    }

    /// Load, modify, and save back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut DraftState) -> Result<()>,
    {
        let mut state = Self::load(path)?;
        f(&mut state)?;
        state.save(path)?;
        Ok(state)
    }
}
