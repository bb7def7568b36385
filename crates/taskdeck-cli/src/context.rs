use taskdeck_core::{AppConfig, TaskdeckError, TaskdeckResult};
use taskdeck_domain::commands::{Command, CommandOutcome};
use taskdeck_domain::TaskStore;
use taskdeck_persistence::{JsonFileStore, LoadOutcome, PersistenceStore, SaveReport};

/// The task file loaded for a single command.
pub struct CliContext {
    pub store: TaskStore,
    pub config: AppConfig,
    persistence: JsonFileStore,
}

impl CliContext {
    /// A missing file starts an empty store. An unreadable one is an error,
    /// so a later save cannot overwrite it.
    pub fn load(config: AppConfig) -> TaskdeckResult<Self> {
        let persistence = JsonFileStore::new(&config.data_file).with_backup(config.backup);
        let store = match persistence.load() {
            LoadOutcome::Loaded(tasks) => TaskStore::from_tasks(tasks),
            LoadOutcome::NotFound => TaskStore::new(),
            LoadOutcome::Invalid(reason) => {
                return Err(TaskdeckError::Serialization(format!(
                    "{}: {}",
                    persistence.path().display(),
                    reason
                )))
            }
        };
        Ok(Self {
            store,
            config,
            persistence,
        })
    }

    pub fn execute(&mut self, command: &dyn Command) -> TaskdeckResult<CommandOutcome> {
        let outcome = command.execute(&mut self.store)?;
        tracing::info!("{} ({:?})", command.description(), outcome);
        Ok(outcome)
    }

    pub fn save(&self) -> TaskdeckResult<SaveReport> {
        self.persistence.save(self.store.tasks())
    }
}
