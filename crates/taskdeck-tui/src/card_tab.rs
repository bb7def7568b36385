//! The card view drawn natively in the terminal.
//!
//! It renders the serialized display document, not the store, and talks to
//! the host the same way the HTML page does: toggles flip the local copy at
//! once and post a bridge message that the host applies on its own loop.

use crate::selection::SelectionState;
use crate::theme::*;
use ratatui::text::{Line, Span};
use std::collections::HashSet;
use taskdeck_cards::{BridgeSender, InboundMessage};
use taskdeck_domain::{DisplayDocument, SubTaskRecord, TaskKey};

pub const EMPTY_MESSAGE: &str = "No task data to display";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRow {
    Group { subject: String },
    Branch { key: TaskKey },
    Info { key: TaskKey },
    Item { key: TaskKey, name: String },
}

pub struct CardTab {
    doc: DisplayDocument,
    expanded: HashSet<TaskKey>,
    rows: Vec<CardRow>,
    pub selection: SelectionState,
    sender: BridgeSender,
}

impl CardTab {
    pub fn new(sender: BridgeSender) -> Self {
        Self {
            doc: DisplayDocument::new(),
            expanded: HashSet::new(),
            rows: Vec::new(),
            selection: SelectionState::new(),
            sender,
        }
    }

    /// Replace the shown document. Expanded branches stay expanded.
    pub fn sync(&mut self, doc: DisplayDocument) {
        self.doc = doc;
        self.rebuild();
    }

    pub fn document(&self) -> &DisplayDocument {
        &self.doc
    }

    pub fn rows(&self) -> &[CardRow] {
        &self.rows
    }

    pub fn is_expanded(&self, key: &TaskKey) -> bool {
        self.expanded.contains(key)
    }

    pub fn next(&mut self) {
        self.selection.next(self.rows.len());
    }

    pub fn prev(&mut self) {
        self.selection.prev();
    }

    fn selected(&self) -> Option<&CardRow> {
        self.selection.get().and_then(|idx| self.rows.get(idx))
    }

    fn rebuild(&mut self) {
        let mut rows = Vec::new();
        for (subject, group) in self.doc.iter() {
            rows.push(CardRow::Group {
                subject: subject.to_string(),
            });
            for record in &group.tasks {
                let key = TaskKey::new(subject, record.branch_number);
                rows.push(CardRow::Branch { key: key.clone() });
                if self.expanded.contains(&key) {
                    rows.push(CardRow::Info { key: key.clone() });
                    for (name, _) in record.sub_task_tasks.iter() {
                        rows.push(CardRow::Item {
                            key: key.clone(),
                            name: name.to_string(),
                        });
                    }
                }
            }
        }
        self.rows = rows;
        self.selection.clamp(self.rows.len());
    }

    /// Flip the checkbox under the cursor and tell the host.
    pub fn toggle_selected(&mut self) {
        let message = match self.selected().cloned() {
            Some(CardRow::Branch { key }) => {
                let Some(record) = self.record_mut(&key) else {
                    return;
                };
                record.completed = !record.completed;
                InboundMessage::UpdateTaskStatus {
                    subject: key.main_task,
                    branch_number: key.branch_number,
                    completed: record.completed,
                }
            }
            Some(CardRow::Item { key, name }) => {
                let Some(record) = self.record_mut(&key) else {
                    return;
                };
                let completed = !record.sub_task_tasks.get(&name).unwrap_or(false);
                record.sub_task_tasks.set(&name, completed);
                InboundMessage::UpdateSubTaskStatus {
                    subject: key.main_task,
                    branch_number: key.branch_number,
                    item_name: name,
                    completed,
                }
            }
            _ => return,
        };

        if let Err(e) = self.sender.post(&message) {
            tracing::warn!("Card toggle not delivered, views may disagree: {}", e);
        }
    }

    /// Expand or collapse the branch under the cursor.
    pub fn toggle_expand(&mut self) {
        let key = match self.selected() {
            Some(CardRow::Branch { key } | CardRow::Info { key } | CardRow::Item { key, .. }) => {
                key.clone()
            }
            _ => return,
        };
        if !self.expanded.remove(&key) {
            self.expanded.insert(key.clone());
        }
        self.rebuild();
        if let Some(idx) = self
            .rows
            .iter()
            .position(|row| matches!(row, CardRow::Branch { key: k } if *k == key))
        {
            self.selection.set(Some(idx));
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = self
            .doc
            .iter()
            .flat_map(|(subject, group)| {
                group
                    .tasks
                    .iter()
                    .map(move |record| TaskKey::new(subject, record.branch_number))
            })
            .collect();
        self.rebuild();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.rebuild();
    }

    fn record_mut(&mut self, key: &TaskKey) -> Option<&mut SubTaskRecord> {
        self.doc
            .groups
            .get_mut(&key.main_task)?
            .tasks
            .iter_mut()
            .find(|record| record.branch_number == key.branch_number)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        self.rows.iter().map(|row| self.row_line(row)).collect()
    }

    fn row_line(&self, row: &CardRow) -> Line<'static> {
        match row {
            CardRow::Group { subject } => {
                let Some(group) = self.doc.group(subject) else {
                    return Line::from(subject.clone());
                };
                let mut spans = vec![Span::styled(subject.clone(), group_header())];
                for task_type in &group.types {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(format!("[{}]", task_type), type_badge()));
                }
                spans.push(Span::styled(
                    format!(
                        "  {}/{} completed  Branches: {}",
                        group.completed_count(),
                        group.tasks.len(),
                        group.tasks.len()
                    ),
                    label_text(),
                ));
                Line::from(spans)
            }
            CardRow::Branch { key } => {
                let Some(record) = self.doc.find(key) else {
                    return Line::from("");
                };
                let marker = if self.is_expanded(key) { "▾ " } else { "▸ " };
                let checkbox = if record.completed { "[x] " } else { "[ ] " };
                Line::from(vec![
                    Span::styled(format!("  {}", marker), label_text()),
                    Span::styled(checkbox, task_text(record.completed)),
                    Span::styled(record.sub_task_name.clone(), task_text(record.completed)),
                    Span::styled(format!(" #{}", record.branch_number), branch_badge()),
                ])
            }
            CardRow::Info { key } => {
                let Some(record) = self.doc.find(key) else {
                    return Line::from("");
                };
                let mut spans = vec![Span::raw("        ")];
                if !record.details.is_empty() {
                    spans.push(Span::styled("Details: ", label_text()));
                    spans.push(Span::styled(record.details.clone(), normal_text()));
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled("Time: ", label_text()));
                spans.push(Span::styled(record.time().to_string(), time_text()));
                spans.push(Span::styled("  Weight: ", label_text()));
                spans.push(Span::styled(record.weight.to_string(), normal_text()));
                Line::from(spans)
            }
            CardRow::Item { key, name } => {
                let completed = self
                    .doc
                    .find(key)
                    .and_then(|record| record.sub_task_tasks.get(name))
                    .unwrap_or(false);
                let checkbox = if completed { "[x] " } else { "[ ] " };
                Line::from(vec![
                    Span::raw("        "),
                    Span::styled(checkbox, task_text(completed)),
                    Span::styled(name.clone(), task_text(completed)),
                ])
            }
        }
    }
}
