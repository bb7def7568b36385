//! Applies bridge messages to the task store.

use crate::bridge::InboundMessage;
use taskdeck_core::TaskdeckResult;
use taskdeck_domain::commands::{Command, CommandOutcome, SetChecklistItem, SetCompleted};
use taskdeck_domain::{TaskRef, TaskStore};

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEffect {
    /// The store changed; dependent views should be refreshed.
    Applied,
    /// The message named a task or item that no longer exists.
    Ignored,
}

#[derive(Debug, Default)]
pub struct CardBridgeHandler;

impl CardBridgeHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        store: &mut TaskStore,
        message: &InboundMessage,
    ) -> TaskdeckResult<BridgeEffect> {
        let target = TaskRef::Key(message.key());
        let command: Box<dyn Command> = match message {
            InboundMessage::UpdateTaskStatus { completed, .. } => Box::new(SetCompleted {
                target,
                completed: *completed,
            }),
            InboundMessage::UpdateSubTaskStatus {
                item_name,
                completed,
                ..
            } => Box::new(SetChecklistItem {
                target,
                item_name: item_name.clone(),
                completed: *completed,
            }),
        };

        let description = command.description();
        match command.execute(store)? {
            CommandOutcome::Applied => {
                tracing::debug!("Card view: {}", description);
                Ok(BridgeEffect::Applied)
            }
            CommandOutcome::Ignored => {
                tracing::debug!("Card view referenced a missing task, ignoring: {}", description);
                Ok(BridgeEffect::Ignored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_domain::{Checklist, Task, TaskKey};

    fn store() -> TaskStore {
        TaskStore::from_tasks(vec![Task::new("English", "Study", "Vocabulary", 1)
            .with_checklist(Checklist::from_items(["textbook", "extra"]))])
    }

    fn key() -> TaskRef {
        TaskRef::Key(TaskKey::new("English", 1))
    }

    #[test]
    fn test_task_status_updates_store() {
        let mut store = store();
        let effect = CardBridgeHandler::new()
            .handle(
                &mut store,
                &InboundMessage::UpdateTaskStatus {
                    subject: "English".to_string(),
                    branch_number: 1,
                    completed: true,
                },
            )
            .unwrap();
        assert_eq!(effect, BridgeEffect::Applied);
        assert!(store.get(&key()).unwrap().completed);
    }

    #[test]
    fn test_subtask_status_updates_one_item() {
        let mut store = store();
        let effect = CardBridgeHandler::new()
            .handle(
                &mut store,
                &InboundMessage::UpdateSubTaskStatus {
                    subject: "English".to_string(),
                    branch_number: 1,
                    item_name: "extra".to_string(),
                    completed: true,
                },
            )
            .unwrap();
        assert_eq!(effect, BridgeEffect::Applied);
        let task = store.get(&key()).unwrap();
        assert_eq!(task.checklist.get("extra"), Some(true));
        assert_eq!(task.checklist.get("textbook"), Some(false));
        assert!(!task.completed);
    }

    #[test]
    fn test_stale_references_are_ignored() {
        let mut store = store();
        let revision = store.revision();
        let handler = CardBridgeHandler::new();

        let missing_branch = InboundMessage::UpdateTaskStatus {
            subject: "English".to_string(),
            branch_number: 7,
            completed: true,
        };
        let missing_item = InboundMessage::UpdateSubTaskStatus {
            subject: "English".to_string(),
            branch_number: 1,
            item_name: "gone".to_string(),
            completed: true,
        };

        assert_eq!(handler.handle(&mut store, &missing_branch).unwrap(), BridgeEffect::Ignored);
        assert_eq!(handler.handle(&mut store, &missing_item).unwrap(), BridgeEffect::Ignored);
        assert_eq!(store.revision(), revision);
    }
}
