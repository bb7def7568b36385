//! The grouped projection of the task list, as persisted and as rendered by
//! the card view.

use crate::checklist::Checklist;
use crate::task::{default_weight, deserialize_weight, EstimatedTime, TaskKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Main-task name → group, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayDocument {
    pub groups: IndexMap<String, MainTaskGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainTaskGroup {
    /// Distinct category labels seen for this main task.
    #[serde(rename = "Types", default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub describe: String,
    #[serde(default)]
    pub sub_task_number: usize,
    #[serde(default)]
    pub tasks: Vec<SubTaskRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTaskRecord {
    pub branch_number: u32,
    pub sub_task_name: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub sub_task_tasks: Checklist,
    #[serde(default)]
    pub estimated_time_hours: u32,
    #[serde(default)]
    pub estimated_time_minutes: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: u8,
}

impl DisplayDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, main_task: &str) -> Option<&MainTaskGroup> {
        self.groups.get(main_task)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MainTaskGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// Total number of sub-task records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.values().map(|group| group.tasks.len()).sum()
    }

    pub fn find(&self, key: &TaskKey) -> Option<&SubTaskRecord> {
        self.groups
            .get(&key.main_task)?
            .tasks
            .iter()
            .find(|record| record.branch_number == key.branch_number)
    }
}

impl MainTaskGroup {
    /// First category label, used as the main-task type when flattening.
    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or("")
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|record| record.completed).count()
    }

    pub fn add_type(&mut self, main_task_type: &str) {
        if !main_task_type.is_empty() && !self.types.iter().any(|t| t == main_task_type) {
            self.types.push(main_task_type.to_string());
        }
    }

    pub fn sort_by_branch(&mut self) {
        self.tasks.sort_by_key(|record| record.branch_number);
    }
}

impl SubTaskRecord {
    pub fn time(&self) -> EstimatedTime {
        EstimatedTime::new(self.estimated_time_hours, self.estimated_time_minutes)
    }
}
