//! The new-task form, independent of any widget toolkit.

use crate::checklist::Checklist;
use crate::commands::validate;
use crate::task::{EstimatedTime, Task, DEFAULT_WEIGHT};
use taskdeck_core::{TaskdeckError, TaskdeckResult};

pub const MAX_MINUTES: u32 = 59;

/// Raw field values collected by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub main_task: String,
    pub main_task_type: String,
    pub sub_task: String,
    pub details: String,
    pub hours: u32,
    pub minutes: u32,
    pub branch_number: u32,
    pub weight: u8,
    pub checklist: Vec<String>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            main_task: String::new(),
            main_task_type: String::new(),
            sub_task: String::new(),
            details: String::new(),
            hours: 0,
            minutes: 0,
            branch_number: 1,
            weight: DEFAULT_WEIGHT,
            checklist: Vec::new(),
        }
    }
}

impl TaskDraft {
    pub fn new(main_task_type: impl Into<String>, weight: u8) -> Self {
        Self {
            main_task_type: main_task_type.into(),
            weight,
            ..Self::default()
        }
    }

    /// Adds a checklist item; blank or duplicate names are refused.
    pub fn add_item(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.checklist.iter().any(|item| item == name) {
            return false;
        }
        self.checklist.push(name.to_string());
        true
    }

    pub fn remove_item(&mut self, index: usize) -> Option<String> {
        (index < self.checklist.len()).then(|| self.checklist.remove(index))
    }

    /// Builds the task, trimming text fields. Nothing is changed on error.
    pub fn build(&self) -> TaskdeckResult<Task> {
        if self.minutes > MAX_MINUTES {
            return Err(TaskdeckError::validation("Minutes must be between 0 and 59"));
        }
        if self.branch_number == 0 {
            return Err(TaskdeckError::validation("Branch number starts at 1"));
        }

        let mut task = Task::new(
            self.main_task.trim(),
            self.main_task_type.trim(),
            self.sub_task.trim(),
            self.branch_number,
        );
        task.details = self.details.trim().to_string();
        task.estimated_time = EstimatedTime::new(self.hours, self.minutes).as_hours();
        task.weight = self.weight;
        task.checklist = Checklist::from_items(self.checklist.iter().cloned());
        validate(&task)?;
        Ok(task)
    }

    /// Prepares the form for the next sub-task of the same main task: the
    /// main task and type stay, the branch number advances, the rest clears.
    pub fn advance(&mut self) {
        self.sub_task.clear();
        self.details.clear();
        self.hours = 0;
        self.minutes = 0;
        self.branch_number = self.branch_number.saturating_add(1);
        self.checklist.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TaskDraft {
        TaskDraft {
            main_task: "English".to_string(),
            main_task_type: "Work".to_string(),
            sub_task: " Vocabulary ".to_string(),
            hours: 0,
            minutes: 30,
            branch_number: 1,
            weight: 10,
            ..TaskDraft::default()
        }
    }

    #[test]
    fn test_build_valid_draft() {
        let mut draft = draft();
        draft.add_item("textbook");
        let task = draft.build().unwrap();
        assert_eq!(task.sub_task, "Vocabulary");
        assert_eq!(task.estimated_time, 0.5);
        assert_eq!(task.branch_number, 1);
        assert!(!task.completed);
        assert_eq!(task.checklist.get("textbook"), Some(false));
    }

    #[test]
    fn test_missing_required_fields() {
        let mut draft = draft();
        draft.sub_task = "   ".to_string();
        let err = draft.build().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("sub-task"));
    }

    #[test]
    fn test_minutes_out_of_range() {
        let mut draft = draft();
        draft.minutes = 60;
        assert!(draft.build().is_err());
    }

    #[test]
    fn test_advance_keeps_main_task_and_bumps_branch() {
        let mut draft = draft();
        draft.details = "notes".to_string();
        draft.add_item("a");
        draft.advance();
        assert_eq!(draft.main_task, "English");
        assert_eq!(draft.main_task_type, "Work");
        assert_eq!(draft.branch_number, 2);
        assert!(draft.sub_task.is_empty());
        assert!(draft.details.is_empty());
        assert!(draft.checklist.is_empty());
        assert_eq!(draft.minutes, 0);
    }

    #[test]
    fn test_checklist_items_unique_and_non_blank() {
        let mut draft = draft();
        assert!(draft.add_item("a"));
        assert!(!draft.add_item(" a "));
        assert!(!draft.add_item("  "));
        assert_eq!(draft.remove_item(0), Some("a".to_string()));
        assert_eq!(draft.remove_item(0), None);
    }
}
