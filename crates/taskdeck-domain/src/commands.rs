//! Handler objects for every task mutation.
//!
//! Views never touch task state directly: a toggle or delete builds one of
//! these with a stable reference to the task, and the reference is resolved
//! against the store only when the command runs.

use crate::store::{TaskRef, TaskStore};
use crate::task::Task;
use taskdeck_core::{TaskdeckError, TaskdeckResult};

/// What a command did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The referenced task or item no longer exists.
    Ignored,
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Trait for commands that mutate the task store
pub trait Command {
    /// Execute this command against the store
    fn execute(&self, store: &mut TaskStore) -> TaskdeckResult<CommandOutcome>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Append a validated task
pub struct AddTask {
    pub task: Task,
}

impl Command for AddTask {
    fn execute(&self, store: &mut TaskStore) -> TaskdeckResult<CommandOutcome> {
        validate(&self.task)?;
        store.add(self.task.clone());
        Ok(CommandOutcome::Applied)
    }

    fn description(&self) -> String {
        format!(
            "Add task '{} - {}' (branch {})",
            self.task.main_task, self.task.sub_task, self.task.branch_number
        )
    }
}

/// Delete a task; confirmation happens before this is built
pub struct RemoveTask {
    pub target: TaskRef,
}

impl Command for RemoveTask {
    fn execute(&self, store: &mut TaskStore) -> TaskdeckResult<CommandOutcome> {
        Ok(match store.remove(&self.target) {
            Some(_) => CommandOutcome::Applied,
            None => CommandOutcome::Ignored,
        })
    }

    fn description(&self) -> String {
        format!("Remove task {:?}", self.target)
    }
}

/// Mark a sub-task complete or incomplete
pub struct SetCompleted {
    pub target: TaskRef,
    pub completed: bool,
}

impl Command for SetCompleted {
    fn execute(&self, store: &mut TaskStore) -> TaskdeckResult<CommandOutcome> {
        Ok(if store.toggle_completion(&self.target, self.completed) {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        })
    }

    fn description(&self) -> String {
        format!("Set {:?} completed={}", self.target, self.completed)
    }
}

/// Tick or untick one checklist item
pub struct SetChecklistItem {
    pub target: TaskRef,
    pub item_name: String,
    pub completed: bool,
}

impl Command for SetChecklistItem {
    fn execute(&self, store: &mut TaskStore) -> TaskdeckResult<CommandOutcome> {
        Ok(
            if store.toggle_subtask(&self.target, &self.item_name, self.completed) {
                CommandOutcome::Applied
            } else {
                CommandOutcome::Ignored
            },
        )
    }

    fn description(&self) -> String {
        format!(
            "Set item '{}' of {:?} completed={}",
            self.item_name, self.target, self.completed
        )
    }
}

/// Required fields must be non-blank; time must be non-negative; weight in 1..=100.
pub fn validate(task: &Task) -> TaskdeckResult<()> {
    let mut missing = Vec::new();
    if task.main_task.trim().is_empty() {
        missing.push("main task");
    }
    if task.main_task_type.trim().is_empty() {
        missing.push("task type");
    }
    if task.sub_task.trim().is_empty() {
        missing.push("sub-task");
    }
    if !missing.is_empty() {
        return Err(TaskdeckError::validation(format!(
            "Please fill in: {}",
            missing.join(", ")
        )));
    }
    if !task.estimated_time.is_finite() || task.estimated_time < 0.0 {
        return Err(TaskdeckError::validation(
            "Estimated time must not be negative",
        ));
    }
    if !(1..=100).contains(&task.weight) {
        return Err(TaskdeckError::validation("Weight must be between 1 and 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKey;

    #[test]
    fn test_add_task_validates() {
        let mut store = TaskStore::new();
        let cmd = AddTask {
            task: Task::new("  ", "Work", "Vocabulary", 1),
        };
        let err = cmd.execute(&mut store).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("main task"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_then_toggle_then_remove() {
        let mut store = TaskStore::new();
        AddTask {
            task: Task::new("English", "Work", "Vocabulary", 1),
        }
        .execute(&mut store)
        .unwrap();

        let target = TaskRef::Key(TaskKey::new("English", 1));
        let outcome = SetCompleted {
            target: target.clone(),
            completed: true,
        }
        .execute(&mut store)
        .unwrap();
        assert!(outcome.is_applied());
        assert!(store.get(&target).unwrap().completed);

        let outcome = RemoveTask {
            target: target.clone(),
        }
        .execute(&mut store)
        .unwrap();
        assert!(outcome.is_applied());
        assert!(store.is_empty());
    }

    #[test]
    fn test_stale_reference_is_ignored() {
        let mut store = TaskStore::new();
        let target = TaskRef::Key(TaskKey::new("English", 1));

        let outcome = SetCompleted {
            target: target.clone(),
            completed: true,
        }
        .execute(&mut store)
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);

        let outcome = SetChecklistItem {
            target,
            item_name: "extra".to_string(),
            completed: true,
        }
        .execute(&mut store)
        .unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);
    }

    #[test]
    fn test_validate_rejects_bad_weight_and_time() {
        let mut task = Task::new("a", "b", "c", 1);
        task.weight = 0;
        assert!(validate(&task).is_err());

        let mut task = Task::new("a", "b", "c", 1);
        task.estimated_time = -1.0;
        assert!(validate(&task).is_err());
    }
}
