//! Key handling for the new-task popup. Field values live in a `TaskDraft`;
//! the focused field is edited through a single input buffer.

use crate::dialog::edit_input;
use crate::events::is_ctrl;
use crossterm::event::{KeyCode, KeyEvent};
use taskdeck_core::InputState;
use taskdeck_domain::{Task, TaskDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Type,
    MainTask,
    SubTask,
    Details,
    Hours,
    Minutes,
    Branch,
    Weight,
    Checklist,
}

const FIELDS: [FormField; 9] = [
    FormField::Type,
    FormField::MainTask,
    FormField::SubTask,
    FormField::Details,
    FormField::Hours,
    FormField::Minutes,
    FormField::Branch,
    FormField::Weight,
    FormField::Checklist,
];

impl FormField {
    pub fn all() -> &'static [FormField] {
        &FIELDS
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::MainTask => "Main task",
            Self::SubTask => "Sub-task",
            Self::Details => "Details",
            Self::Hours => "Hours",
            Self::Minutes => "Minutes",
            Self::Branch => "Branch",
            Self::Weight => "Weight",
            Self::Checklist => "Checklist item",
        }
    }

    fn index(self) -> usize {
        FIELDS.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        FIELDS[(self.index() + 1) % FIELDS.len()]
    }

    fn prev(self) -> Self {
        FIELDS[(self.index() + FIELDS.len() - 1) % FIELDS.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

pub struct TaskForm {
    pub draft: TaskDraft,
    pub field: FormField,
    pub input: InputState,
    pub error: Option<String>,
    categories: Vec<String>,
    default_weight: u8,
    branch_edited: bool,
}

impl TaskForm {
    pub fn new(categories: Vec<String>, default_weight: u8) -> Self {
        let first = categories.first().cloned().unwrap_or_default();
        let mut form = Self {
            draft: TaskDraft::new(first, default_weight),
            field: FormField::Type,
            input: InputState::new(),
            error: None,
            categories,
            default_weight,
            branch_edited: false,
        };
        form.focus(FormField::Type);
        form
    }

    pub fn branch_edited(&self) -> bool {
        self.branch_edited
    }

    /// Branch number proposed by the host for the current main task. Ignored
    /// once the user typed a branch number.
    pub fn suggest_branch(&mut self, branch_number: u32) {
        if !self.branch_edited && self.draft.branch_number != branch_number {
            self.draft.branch_number = branch_number;
            if self.field == FormField::Branch {
                self.input = InputState::with_text(branch_number.to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        self.error = None;

        if is_ctrl(&key, 's') {
            return if self.commit() {
                FormAction::Submit
            } else {
                FormAction::None
            };
        }
        if self.field == FormField::Type && (is_ctrl(&key, 'n') || is_ctrl(&key, 'p')) {
            self.cycle_type(is_ctrl(&key, 'n'));
            return FormAction::None;
        }
        if self.field == FormField::Checklist && is_ctrl(&key, 'd') {
            if let Some(last) = self.draft.checklist.len().checked_sub(1) {
                self.draft.remove_item(last);
            }
            return FormAction::None;
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter if self.field == FormField::Checklist => {
                if !self.draft.add_item(self.input.as_str()) {
                    self.error = Some("Checklist items must be unique and non-empty".to_string());
                }
                self.input.clear();
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                if self.commit() {
                    self.focus(self.field.next());
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if self.commit() {
                    self.focus(self.field.prev());
                }
            }
            code => {
                edit_input(&mut self.input, code);
            }
        }
        FormAction::None
    }

    /// Validated task from the current values. The error is also kept for
    /// inline display.
    pub fn build(&mut self) -> Result<Task, String> {
        self.draft.build().map_err(|e| {
            let message = e.to_string();
            self.error = Some(message.clone());
            message
        })
    }

    /// Clears the per-sub-task fields after a successful add.
    pub fn advance(&mut self) {
        self.draft.advance();
        self.branch_edited = false;
        self.focus(FormField::SubTask);
    }

    pub fn field_value(&self, field: FormField) -> String {
        let draft = &self.draft;
        match field {
            FormField::Type => draft.main_task_type.clone(),
            FormField::MainTask => draft.main_task.clone(),
            FormField::SubTask => draft.sub_task.clone(),
            FormField::Details => draft.details.clone(),
            FormField::Hours => draft.hours.to_string(),
            FormField::Minutes => draft.minutes.to_string(),
            FormField::Branch => draft.branch_number.to_string(),
            FormField::Weight => draft.weight.to_string(),
            FormField::Checklist => String::new(),
        }
    }

    fn focus(&mut self, field: FormField) {
        self.field = field;
        self.input = InputState::with_text(self.field_value(field));
    }

    fn cycle_type(&mut self, forward: bool) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len();
        let next = match self.categories.iter().position(|c| *c == self.input.trimmed()) {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        self.input = InputState::with_text(self.categories[next].clone());
    }

    /// Writes the input buffer into the draft. Returns false and keeps focus
    /// when the text does not parse.
    fn commit(&mut self) -> bool {
        let text = self.input.as_str().to_string();
        let draft = &mut self.draft;
        let parsed = match self.field {
            FormField::Type => {
                draft.main_task_type = text;
                Ok(())
            }
            FormField::MainTask => {
                draft.main_task = text;
                Ok(())
            }
            FormField::SubTask => {
                draft.sub_task = text;
                Ok(())
            }
            FormField::Details => {
                draft.details = text;
                Ok(())
            }
            FormField::Hours => parse_or(&self.input, 0)
                .map(|hours| draft.hours = hours)
                .map_err(|_| "Hours must be a whole number"),
            FormField::Minutes => parse_or(&self.input, 0)
                .map(|minutes| draft.minutes = minutes)
                .map_err(|_| "Minutes must be a whole number"),
            FormField::Branch => parse_or(&self.input, draft.branch_number)
                .map(|branch| {
                    if branch != draft.branch_number {
                        self.branch_edited = true;
                    }
                    draft.branch_number = branch;
                })
                .map_err(|_| "Branch must be a whole number"),
            FormField::Weight => parse_or(&self.input, self.default_weight)
                .map(|weight| draft.weight = weight)
                .map_err(|_| "Weight must be between 1 and 100"),
            FormField::Checklist => {
                if !self.input.trimmed().is_empty() && draft.add_item(self.input.as_str()) {
                    self.input.clear();
                }
                Ok(())
            }
        };
        match parsed {
            Ok(()) => true,
            Err(message) => {
                self.error = Some(message.to_string());
                false
            }
        }
    }
}

fn parse_or<T: std::str::FromStr>(input: &InputState, default: T) -> Result<T, T::Err> {
    input.parse_number().unwrap_or(Ok(default))
}
