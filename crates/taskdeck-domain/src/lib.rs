pub mod checklist;
pub mod commands;
pub mod convert;
pub mod display;
pub mod filter;
pub mod form;
pub mod search;
pub mod store;
pub mod task;

pub use checklist::Checklist;
pub use convert::{flatten, group};
pub use display::{DisplayDocument, MainTaskGroup, SubTaskRecord};
pub use filter::{filter_by_type, TaskFilter, TypeFilter, ALL_TYPES};
pub use form::TaskDraft;
pub use search::{search, CompositeSearcher, SearchField, TaskSearcher};
pub use store::{TaskRef, TaskStore};
pub use task::{EstimatedTime, Task, TaskId, TaskKey, DEFAULT_WEIGHT};
