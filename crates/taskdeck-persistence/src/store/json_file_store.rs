use crate::backup::backup_file;
use crate::serialization::JsonSerializer;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{LoadOutcome, PersistenceStore, SaveReport, Serializer};
use chrono::{Local, NaiveDateTime};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use taskdeck_core::{TaskdeckError, TaskdeckResult};
use taskdeck_domain::{convert, DisplayDocument, Task};

/// Task list stored as a grouped JSON document keyed by main task.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    backup: bool,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            backup: true,
        }
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Save with an explicit clock, used for the backup name.
    pub fn save_at(&self, tasks: &[Task], now: NaiveDateTime) -> TaskdeckResult<SaveReport> {
        let doc = convert::group(tasks);
        let bytes = JsonSerializer.serialize(&doc)?;

        // A failed backup never blocks the save.
        let backup = if self.backup {
            match backup_file(&self.path, now) {
                Ok(backup) => backup,
                Err(e) => {
                    tracing::warn!("Could not back up {}: {}", self.path.display(), e);
                    None
                }
            }
        } else {
            None
        };

        AtomicWriter::write_atomic(&self.path, &bytes)?;

        tracing::info!(
            "Saved {} tasks in {} groups ({} bytes) to {}",
            tasks.len(),
            doc.len(),
            bytes.len(),
            self.path.display()
        );

        Ok(SaveReport {
            path: self.path.clone(),
            backup,
            bytes: bytes.len(),
            saved_at: now,
        })
    }

    /// Read the grouped document without flattening it.
    pub fn load_document(&self) -> TaskdeckResult<DisplayDocument> {
        let bytes = match AtomicWriter::read_all(&self.path) {
            Ok(bytes) => bytes,
            Err(TaskdeckError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(TaskdeckError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e),
        };
        JsonSerializer.deserialize(&bytes)
    }
}

impl PersistenceStore for JsonFileStore {
    fn save(&self, tasks: &[Task]) -> TaskdeckResult<SaveReport> {
        self.save_at(tasks, Local::now().naive_local())
    }

    fn load(&self) -> LoadOutcome {
        match self.load_document() {
            Ok(doc) => {
                let tasks = convert::flatten(&doc);
                tracing::info!(
                    "Loaded {} tasks in {} groups from {}",
                    tasks.len(),
                    doc.len(),
                    self.path.display()
                );
                LoadOutcome::Loaded(tasks)
            }
            Err(TaskdeckError::NotFound(_)) => {
                tracing::info!("No task file at {}", self.path.display());
                LoadOutcome::NotFound
            }
            Err(e) => {
                tracing::warn!("Could not load {}: {}", self.path.display(), e);
                LoadOutcome::Invalid(e.to_string())
            }
        }
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
