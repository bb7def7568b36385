//! Category filtering.

use crate::task::Task;

/// Sentinel category meaning "do not filter".
pub const ALL_TYPES: &str = "all";

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Exact match on the main-task type. The sentinel `all` and the empty
/// string match every task.
pub struct TypeFilter {
    main_task_type: Option<String>,
}

impl TypeFilter {
    pub fn new(main_task_type: impl Into<String>) -> Self {
        let main_task_type = main_task_type.into();
        let main_task_type = if main_task_type.is_empty() || main_task_type == ALL_TYPES {
            None
        } else {
            Some(main_task_type)
        };
        Self { main_task_type }
    }

    pub fn all() -> Self {
        Self {
            main_task_type: None,
        }
    }

    pub fn is_all(&self) -> bool {
        self.main_task_type.is_none()
    }
}

impl TaskFilter for TypeFilter {
    fn matches(&self, task: &Task) -> bool {
        match &self.main_task_type {
            Some(wanted) => task.main_task_type == *wanted,
            None => true,
        }
    }
}

/// Filters by category, keeping the input order.
pub fn filter_by_type<'a, I>(tasks: I, main_task_type: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let filter = TypeFilter::new(main_task_type);
    tasks.into_iter().filter(|task| filter.matches(task)).collect()
}
