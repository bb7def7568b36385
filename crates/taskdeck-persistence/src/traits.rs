use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use taskdeck_core::TaskdeckResult;
use taskdeck_domain::Task;

/// Result of a successful save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    /// File that was written
    pub path: PathBuf,
    /// Copy of the previous file, when one existed and could be copied
    pub backup: Option<PathBuf>,
    /// Bytes written
    pub bytes: usize,
    pub saved_at: NaiveDateTime,
}

/// Result of a load attempt. Loading never fails past the store boundary;
/// callers decide how to report the non-loaded cases.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<Task>),
    /// No file at the path
    NotFound,
    /// The file exists but could not be read or parsed
    Invalid(String),
}

impl LoadOutcome {
    pub fn into_tasks(self) -> Option<Vec<Task>> {
        match self {
            Self::Loaded(tasks) => Some(tasks),
            _ => None,
        }
    }
}

/// Trait for task-list storage backends
pub trait PersistenceStore {
    /// Write the task list, backing up any existing file first
    fn save(&self, tasks: &[Task]) -> TaskdeckResult<SaveReport>;

    /// Read the task list back into flat form
    fn load(&self) -> LoadOutcome;

    /// Check if the store file exists
    fn exists(&self) -> bool;

    /// Get the path to the store file
    fn path(&self) -> &Path;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T> {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> TaskdeckResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> TaskdeckResult<T>;
}
