//! File-backed repository: one JSON document per table.
//!
//! Every call takes a lock on `<table>.lock` for its whole duration (shared
//! for reads, exclusive for writes) and releases it when the guard drops.
//! Writes are atomic: the table is serialized to a temp file in the same
//! directory, synced, then renamed over `<table>.json`.

use super::{Entity, Repository};
use crate::error::BoxedCause;
use crate::{EntityId, Error, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

type StoreResult<T> = std::result::Result<T, BoxedCause>;

/// On-disk layout of a table file
#[derive(Debug, Serialize, Deserialize)]
struct TableFile<T> {
    next_id: u32,
    rows: Vec<T>,
}

impl<T> Default for TableFile<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: Vec::new(),
        }
    }
}

/// Lock held on a table for the duration of one repository call
struct TableLock {
    file: File,
}

impl TableLock {
    fn open(path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)
    }

    fn shared(path: &Path) -> io::Result<Self> {
        let file = Self::open(path)?;
        file.lock_shared()?;
        Ok(Self { file })
    }

    fn exclusive(path: &Path) -> io::Result<Self> {
        let file = Self::open(path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for TableLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release table lock: {}", e);
        }
    }
}

/// Repository storing rows of `T` in `<data_dir>/<T::TABLE>.json`
#[derive(Clone, Debug)]
pub struct JsonTableRepository<T> {
    dir: PathBuf,
    table_path: PathBuf,
    lock_path: PathBuf,
    _entity: PhantomData<T>,
}

impl<T: Entity> JsonTableRepository<T> {
    /// Open the table in `data_dir`, creating the directory if needed
    ///
    /// The table file itself is created on the first write.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = data_dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::database(format!("Error opening data directory {:?}", dir), e)
        })?;

        Ok(Self {
            table_path: dir.join(format!("{}.json", T::TABLE)),
            lock_path: dir.join(format!("{}.lock", T::TABLE)),
            dir,
            _entity: PhantomData,
        })
    }

    /// Path of the table file
    pub fn path(&self) -> &Path {
        &self.table_path
    }

    fn read_table(&self) -> StoreResult<TableFile<T>> {
        let contents = match std::fs::read_to_string(&self.table_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TableFile::default()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(TableFile::default());
        }

        let table: TableFile<T> = serde_json::from_str(&contents)?;
        tracing::debug!("Read {} rows from {:?}", table.rows.len(), self.table_path);
        Ok(table)
    }

    fn write_table(&self, table: &TableFile<T>) -> StoreResult<()> {
        let temp = NamedTempFile::new_in(&self.dir)?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, table)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&self.table_path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} rows to {:?}", table.rows.len(), self.table_path);
        Ok(())
    }

    /// Run a read-only operation under a shared lock
    fn read<R>(&self, f: impl FnOnce(TableFile<T>) -> R) -> StoreResult<R> {
        let _lock = TableLock::shared(&self.lock_path)?;
        let table = self.read_table()?;
        Ok(f(table))
    }

    /// Run a read-modify-write operation under an exclusive lock
    fn modify<R>(
        &self,
        f: impl FnOnce(&mut TableFile<T>) -> Option<R>,
    ) -> StoreResult<Option<R>> {
        let _lock = TableLock::exclusive(&self.lock_path)?;
        let mut table = self.read_table()?;
        let outcome = f(&mut table);
        if outcome.is_some() {
            self.write_table(&table)?;
        }
        Ok(outcome)
    }

    fn context(action: &str) -> String {
        format!("Error {} {}", action, T::LABEL.to_lowercase())
    }
}

impl<T: Entity> Repository<T> for JsonTableRepository<T> {
    fn create(&mut self, entity: T) -> Result<T> {
        let created = self
            .modify(|table| {
                let stored = entity.with_id(EntityId(table.next_id));
                table.next_id += 1;
                table.rows.push(stored.clone());
                Some(stored)
            })
            .map_err(|e| Error::database(Self::context("creating"), e))?;

        // modify only returns None when the closure does
        created.ok_or_else(|| Error::database(Self::context("creating"), "no row written"))
    }

    fn get_all(&self) -> Result<Vec<T>> {
        self.read(|table| table.rows)
            .map_err(|e| Error::database(format!("{}s", Self::context("fetching")), e))
    }

    fn get_by_id(&self, id: EntityId) -> Result<Option<T>> {
        self.read(|table| table.rows.into_iter().find(|row| row.id() == Some(id)))
            .map_err(|e| Error::database(format!("{} by id", Self::context("fetching")), e))
    }

    fn update(&mut self, id: EntityId, entity: T) -> Result<()> {
        let updated = self
            .modify(|table| {
                let row = table.rows.iter_mut().find(|row| row.id() == Some(id))?;
                *row = entity.with_id(id);
                Some(())
            })
            .map_err(|e| Error::database(Self::context("updating"), e))?;

        if updated.is_some() {
            tracing::debug!("Updated {} row {}", T::TABLE, id);
        }
        Ok(())
    }

    fn delete(&mut self, id: EntityId) -> Result<()> {
        let deleted = self
            .modify(|table| {
                let idx = table.rows.iter().position(|row| row.id() == Some(id))?;
                Some(table.rows.remove(idx))
            })
            .map_err(|e| Error::database(Self::context("deleting"), e))?;

        if deleted.is_some() {
            tracing::debug!("Deleted {} row {}", T::TABLE, id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::contract;
    use crate::{CardioWorkout, Exercise, StrengthWorkout};
    use std::error::Error as _;

    fn cardio_repo(dir: &Path) -> JsonTableRepository<CardioWorkout> {
        JsonTableRepository::open(dir).unwrap()
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        contract::create_then_get_round_trips(cardio_repo(temp_dir.path()));
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let temp_dir = tempfile::tempdir().unwrap();
        contract::ids_are_unique_and_ordered(cardio_repo(temp_dir.path()));
    }

    #[test]
    fn test_update_touches_only_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        contract::update_touches_only_target(cardio_repo(temp_dir.path()));
    }

    #[test]
    fn test_delete_removes_only_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        contract::delete_removes_only_target(cardio_repo(temp_dir.path()));
    }

    #[test]
    fn test_missing_rows_are_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        contract::missing_rows_are_absent(cardio_repo(temp_dir.path()));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let temp_dir = tempfile::tempdir().unwrap();
        contract::ids_are_not_reused(cardio_repo(temp_dir.path()));
    }

    #[test]
    fn test_rows_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();

        let created = {
            let mut repo: JsonTableRepository<StrengthWorkout> =
                JsonTableRepository::open(temp_dir.path()).unwrap();
            repo.create(StrengthWorkout::new("Squats", 25, 200, 5, 12, 80.0))
                .unwrap()
        };

        let repo: JsonTableRepository<StrengthWorkout> =
            JsonTableRepository::open(temp_dir.path()).unwrap();
        assert_eq!(repo.get_all().unwrap(), vec![created]);
    }

    #[test]
    fn test_tables_are_separate_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut cardio = cardio_repo(temp_dir.path());
        let mut exercises: JsonTableRepository<Exercise> =
            JsonTableRepository::open(temp_dir.path()).unwrap();

        cardio
            .create(CardioWorkout::new("Swimming", 40, 350, 2.0, 120))
            .unwrap();
        exercises
            .create(Exercise::new("Push-ups", "Chest", "None"))
            .unwrap();

        assert!(temp_dir.path().join("cardio_workouts.json").exists());
        assert!(temp_dir.path().join("exercises.json").exists());
        assert!(!temp_dir.path().join("strength_workouts.json").exists());
        assert_eq!(exercises.path(), temp_dir.path().join("exercises.json"));
    }

    #[test]
    fn test_no_stray_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut repo = cardio_repo(temp_dir.path());
        for _ in 0..3 {
            repo.create(CardioWorkout::new("Run", 30, 300, 5.0, 145))
                .unwrap();
        }

        let mut names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["cardio_workouts.json", "cardio_workouts.lock"]);
    }

    #[test]
    fn test_corrupted_table_is_database_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("cardio_workouts.json"), "{ invalid json }").unwrap();

        let repo = cardio_repo(temp_dir.path());
        let err = repo.get_all().unwrap_err();

        assert!(matches!(err, Error::Database { .. }));
        assert_eq!(err.to_string(), "Database error: Error fetching cardio workouts");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_table_file_reads_as_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("cardio_workouts.json"), "").unwrap();

        let repo = cardio_repo(temp_dir.path());
        assert!(repo.get_all().unwrap().is_empty());
    }
}
