use crate::convert;
use crate::display::DisplayDocument;
use crate::filter::{TaskFilter, TypeFilter};
use crate::search::{CompositeSearcher, TaskSearcher};
use crate::task::{Task, TaskId, TaskKey};

/// How a caller names a task: by the store-assigned id (native views) or by
/// main task and branch number (serialized copies such as the card view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRef {
    Id(TaskId),
    Key(TaskKey),
}

impl From<TaskId> for TaskRef {
    fn from(id: TaskId) -> Self {
        Self::Id(id)
    }
}

impl From<TaskKey> for TaskRef {
    fn from(key: TaskKey) -> Self {
        Self::Key(key)
    }
}

/// The canonical, ordered task list. Every view reads from and writes
/// through this store; the display document is derived from it on demand.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    revision: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut store = Self::new();
        store.replace_all(tasks);
        store
    }

    /// Appends a task and assigns it a fresh id. Validation and branch
    /// numbering are the caller's job.
    pub fn add(&mut self, mut task: Task) -> TaskId {
        self.next_id += 1;
        task.id = TaskId(self.next_id);
        let id = task.id;
        self.tasks.push(task);
        self.touch();
        id
    }

    /// Removes the first task matching `target`.
    pub fn remove(&mut self, target: &TaskRef) -> Option<Task> {
        let Some(index) = self.position(target) else {
            tracing::debug!("Remove skipped, no task for {:?}", target);
            return None;
        };
        let task = self.tasks.remove(index);
        self.touch();
        Some(task)
    }

    /// Replaces the whole list, e.g. after a load.
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.clear();
        for task in tasks {
            self.add(task);
        }
        self.touch();
        tracing::debug!("Store replaced with {} task(s)", self.tasks.len());
    }

    /// Returns false when the task no longer exists.
    pub fn toggle_completion(&mut self, target: &TaskRef, completed: bool) -> bool {
        match self.get_mut(target) {
            Some(task) => {
                task.completed = completed;
                self.touch();
                true
            }
            None => {
                tracing::debug!("Completion toggle skipped, no task for {:?}", target);
                false
            }
        }
    }

    /// Returns false when the task or the checklist item no longer exists.
    pub fn toggle_subtask(&mut self, target: &TaskRef, item_name: &str, completed: bool) -> bool {
        let updated = self
            .get_mut(target)
            .is_some_and(|task| task.checklist.set(item_name, completed));
        if updated {
            self.touch();
        } else {
            tracing::debug!("Checklist toggle skipped, no item {:?} for {:?}", item_name, target);
        }
        updated
    }

    pub fn get(&self, target: &TaskRef) -> Option<&Task> {
        self.position(target).map(|index| &self.tasks[index])
    }

    fn get_mut(&mut self, target: &TaskRef) -> Option<&mut Task> {
        let index = self.position(target)?;
        self.tasks.get_mut(index)
    }

    fn position(&self, target: &TaskRef) -> Option<usize> {
        match target {
            TaskRef::Id(id) => self.tasks.iter().position(|task| task.id == *id),
            TaskRef::Key(key) => self.tasks.iter().position(|task| task.matches_key(key)),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Bumped on every mutation so derived projections know when to refresh.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// One past the highest branch number used under `main_task`.
    pub fn next_branch_number(&self, main_task: &str) -> u32 {
        self.tasks
            .iter()
            .filter(|task| task.main_task == main_task)
            .map(|task| task.branch_number)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Category filter then search, in store order.
    pub fn filtered(&self, main_task_type: &str, query: &str) -> Vec<&Task> {
        let filter = TypeFilter::new(main_task_type);
        let searcher = CompositeSearcher::all(query);
        self.tasks
            .iter()
            .filter(|task| filter.matches(task) && searcher.matches(task))
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for task in &self.tasks {
            if !task.main_task_type.is_empty() && !seen.contains(&task.main_task_type.as_str()) {
                seen.push(&task.main_task_type);
            }
        }
        seen
    }

    pub fn document(&self) -> DisplayDocument {
        convert::group(&self.tasks)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
