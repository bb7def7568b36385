//! Task search.
//!
//! Case-insensitive substring search over the category, main task, sub-task
//! and details. Shared by the TUI and the CLI for consistent results.

use crate::task::Task;

/// Trait for searching tasks by various criteria.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// A searchable text field of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    MainTaskType,
    MainTask,
    SubTask,
    Details,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::MainTaskType,
        SearchField::MainTask,
        SearchField::SubTask,
        SearchField::Details,
    ];

    fn text<'a>(&self, task: &'a Task) -> &'a str {
        match self {
            Self::MainTaskType => &task.main_task_type,
            Self::MainTask => &task.main_task,
            Self::SubTask => &task.sub_task,
            Self::Details => &task.details,
        }
    }
}

/// Matches if any of its fields contains the query.
pub struct CompositeSearcher {
    query: String,
    fields: Vec<SearchField>,
}

impl CompositeSearcher {
    /// Search across every field.
    pub fn all(query: impl Into<String>) -> Self {
        Self::with_fields(query, SearchField::ALL)
    }

    pub fn with_fields(query: impl Into<String>, fields: impl IntoIterator<Item = SearchField>) -> Self {
        Self {
            query: query.into().to_lowercase(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TaskSearcher for CompositeSearcher {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        self.fields
            .iter()
            .any(|field| field.text(task).to_lowercase().contains(&self.query))
    }
}

/// Keeps tasks matching `query`, in input order. An empty query keeps all.
pub fn search<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let searcher = CompositeSearcher::all(query);
    tasks
        .into_iter()
        .filter(|task| searcher.matches(task))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("English", "Work", "Vocabulary", 1).with_details("Twenty words"),
            Task::new("Chinese", "Study", "Poems", 1),
            Task::new("Gym", "Life", "Legs", 1).with_details("squats"),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        let tasks = tasks();
        assert_eq!(search(&tasks, ""), tasks.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_matches_each_field_case_insensitively() {
        let tasks = tasks();
        let names = |q: &str| -> Vec<String> {
            search(&tasks, q)
                .iter()
                .map(|t| t.main_task.clone())
                .collect()
        };
        assert_eq!(names("STUDY"), vec!["Chinese"]);
        assert_eq!(names("engl"), vec!["English"]);
        assert_eq!(names("poem"), vec!["Chinese"]);
        assert_eq!(names("SQUAT"), vec!["Gym"]);
        assert!(names("database").is_empty());
    }

    #[test]
    fn test_results_are_subset_and_match() {
        let tasks = tasks();
        let searcher = CompositeSearcher::all("e");
        let found = search(&tasks, "e");
        assert!(found.len() <= tasks.len());
        assert!(found.iter().all(|task| searcher.matches(task)));
    }

    #[test]
    fn test_restricted_fields() {
        let tasks = tasks();
        let searcher = CompositeSearcher::with_fields("words", [SearchField::SubTask]);
        assert!(!searcher.matches(&tasks[0]));
        let searcher = CompositeSearcher::with_fields("words", [SearchField::Details]);
        assert!(searcher.matches(&tasks[0]));
    }
}
