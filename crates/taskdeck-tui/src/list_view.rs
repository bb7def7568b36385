//! The native task list: filtered tasks grouped by main task, each group
//! ordered by branch number, with checklist items as their own rows.

use crate::selection::SelectionState;
use crate::theme::*;
use ratatui::text::{Line, Span};
use taskdeck_domain::commands::{Command, SetChecklistItem, SetCompleted};
use taskdeck_domain::{Task, TaskId, TaskRef};

pub const EMPTY_MESSAGE: &str = "No tasks to display";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: TaskId,
    pub sub_task: String,
    pub main_task_type: String,
    pub branch_number: u32,
    pub time: String,
    pub weight: u8,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListRow {
    Group { main_task: String, count: usize },
    Task(TaskRow),
    Details { id: TaskId, text: String },
    Item { id: TaskId, name: String, completed: bool },
}

impl ListRow {
    /// Task this row belongs to, if any.
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Group { .. } => None,
            Self::Task(row) => Some(row.id),
            Self::Details { id, .. } | Self::Item { id, .. } => Some(*id),
        }
    }
}

pub fn build_rows(tasks: &[&Task]) -> Vec<ListRow> {
    let mut groups: Vec<(&str, Vec<&Task>)> = Vec::new();
    for &task in tasks {
        match groups.iter_mut().find(|(name, _)| *name == task.main_task) {
            Some((_, members)) => members.push(task),
            None => groups.push((task.main_task.as_str(), vec![task])),
        }
    }

    let mut rows = Vec::new();
    for (main_task, mut members) in groups {
        members.sort_by_key(|task| task.branch_number);
        rows.push(ListRow::Group {
            main_task: main_task.to_string(),
            count: members.len(),
        });
        for task in members {
            rows.push(ListRow::Task(TaskRow {
                id: task.id,
                sub_task: task.sub_task.clone(),
                main_task_type: task.main_task_type.clone(),
                branch_number: task.branch_number,
                time: task.time().to_string(),
                weight: task.weight,
                completed: task.completed,
            }));
            if !task.details.is_empty() {
                rows.push(ListRow::Details {
                    id: task.id,
                    text: task.details.clone(),
                });
            }
            for (name, completed) in task.checklist.iter() {
                rows.push(ListRow::Item {
                    id: task.id,
                    name: name.to_string(),
                    completed,
                });
            }
        }
    }
    rows
}

#[derive(Debug, Default)]
pub struct ListView {
    rows: Vec<ListRow>,
    pub selection: SelectionState,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, tasks: &[&Task]) {
        self.rows = build_rows(tasks);
        self.selection.clamp(self.rows.len());
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<&ListRow> {
        self.selection.get().and_then(|idx| self.rows.get(idx))
    }

    /// Command for the toggle under the cursor, bound to the task's id.
    pub fn toggle_command(&self) -> Option<Box<dyn Command>> {
        match self.selected()? {
            ListRow::Task(row) => Some(Box::new(SetCompleted {
                target: TaskRef::Id(row.id),
                completed: !row.completed,
            })),
            ListRow::Item {
                id,
                name,
                completed,
            } => Some(Box::new(SetChecklistItem {
                target: TaskRef::Id(*id),
                item_name: name.clone(),
                completed: !completed,
            })),
            _ => None,
        }
    }

    /// Task a delete request would target.
    pub fn delete_target(&self) -> Option<TaskId> {
        self.selected()?.task_id()
    }

    pub fn next(&mut self) {
        self.selection.next(self.rows.len());
    }

    pub fn prev(&mut self) {
        self.selection.prev();
    }
}

pub fn row_line(row: &ListRow) -> Line<'static> {
    match row {
        ListRow::Group { main_task, count } => Line::from(vec![
            Span::styled(main_task.clone(), group_header()),
            Span::styled(format!("  ({} sub-tasks)", count), label_text()),
        ]),
        ListRow::Task(task) => {
            let checkbox = if task.completed { "[x] " } else { "[ ] " };
            Line::from(vec![
                Span::raw("  "),
                Span::styled(checkbox, task_text(task.completed)),
                Span::styled(task.sub_task.clone(), task_text(task.completed)),
                Span::raw(" "),
                Span::styled(format!("[{}]", task.main_task_type), type_badge()),
                Span::raw(" "),
                Span::styled(format!("#{}", task.branch_number), branch_badge()),
                Span::raw(" "),
                Span::styled(task.time.clone(), time_text()),
                Span::styled(format!("  w{}", task.weight), label_text()),
            ])
        }
        ListRow::Details { text, .. } => Line::from(vec![
            Span::raw("      "),
            Span::styled(text.clone(), label_text()),
        ]),
        ListRow::Item {
            name, completed, ..
        } => {
            let checkbox = if *completed { "[x] " } else { "[ ] " };
            Line::from(vec![
                Span::raw("      "),
                Span::styled(checkbox, task_text(*completed)),
                Span::styled(name.clone(), task_text(*completed)),
            ])
        }
    }
}
