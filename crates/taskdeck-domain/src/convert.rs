//! Reshaping between the flat task list and the grouped display document.
//!
//! Both directions are pure. The only lossy fields are the main-task type,
//! which collapses to the first type seen in a group, and the estimated
//! time, which is rounded to whole minutes.

use crate::display::{DisplayDocument, MainTaskGroup, SubTaskRecord};
use crate::task::{EstimatedTime, Task};

/// Groups tasks by main task in first-seen order, sorting each group's
/// records by branch number (stable for equal branches).
pub fn group<'a, I>(tasks: I) -> DisplayDocument
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut doc = DisplayDocument::new();

    for task in tasks {
        let group = doc
            .groups
            .entry(task.main_task.clone())
            .or_insert_with(MainTaskGroup::default);
        group.add_type(&task.main_task_type);
        group.tasks.push(to_record(task));
    }

    for group in doc.groups.values_mut() {
        group.sub_task_number = group.tasks.len();
        group.sort_by_branch();
    }

    doc
}

/// Inverse of [`group`]. Every task in a group takes the group's first type.
pub fn flatten(doc: &DisplayDocument) -> Vec<Task> {
    doc.iter()
        .flat_map(|(main_task, group)| {
            let main_task_type = group.primary_type();
            group
                .tasks
                .iter()
                .map(move |record| from_record(main_task, main_task_type, record))
        })
        .collect()
}

fn to_record(task: &Task) -> SubTaskRecord {
    let time = task.time();
    SubTaskRecord {
        branch_number: task.branch_number,
        sub_task_name: task.sub_task.clone(),
        details: task.details.clone(),
        sub_task_tasks: task.checklist.clone(),
        estimated_time_hours: time.hours,
        estimated_time_minutes: time.minutes,
        completed: task.completed,
        weight: task.weight,
    }
}

fn from_record(main_task: &str, main_task_type: &str, record: &SubTaskRecord) -> Task {
    let mut task = Task::new(
        main_task,
        main_task_type,
        record.sub_task_name.clone(),
        record.branch_number,
    );
    task.details = record.details.clone();
    task.estimated_time =
        EstimatedTime::new(record.estimated_time_hours, record.estimated_time_minutes).as_hours();
    task.weight = record.weight;
    task.completed = record.completed;
    task.checklist = record.sub_task_tasks.clone();
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Checklist;
    use pretty_assertions::assert_eq;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("English", "Work", "Dictation", 2).with_time(0, 10),
            Task::new("Chinese", "Study", "Poems", 1).with_time(1, 30),
            Task::new("English", "Work", "Vocabulary", 1)
                .with_time(0, 11)
                .with_details("20 words a day")
                .with_checklist(Checklist::from_items(["textbook", "extra"])),
        ]
    }

    #[test]
    fn test_group_first_seen_order_and_branch_sort() {
        let doc = group(&sample_tasks());
        let names: Vec<_> = doc.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["English", "Chinese"]);

        let english = doc.group("English").unwrap();
        assert_eq!(english.sub_task_number, 2);
        let branches: Vec<_> = english.tasks.iter().map(|r| r.branch_number).collect();
        assert_eq!(branches, vec![1, 2]);
        assert_eq!(english.tasks[0].estimated_time_minutes, 11);
    }

    #[test]
    fn test_group_collects_distinct_types() {
        let tasks = vec![
            Task::new("English", "Work", "a", 1),
            Task::new("English", "Study", "b", 2),
            Task::new("English", "Work", "c", 3),
        ];
        let doc = group(&tasks);
        assert_eq!(doc.group("English").unwrap().types, vec!["Work", "Study"]);
    }

    #[test]
    fn test_flatten_group_preserves_tasks() {
        let tasks = sample_tasks();
        let restored = flatten(&group(&tasks));

        let mut expected = vec![tasks[2].clone(), tasks[0].clone(), tasks[1].clone()];
        for task in &mut expected {
            task.estimated_time = task.time().as_hours();
        }
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_flatten_collapses_mixed_types_to_first() {
        let tasks = vec![
            Task::new("English", "Work", "a", 1),
            Task::new("English", "Study", "b", 2),
        ];
        let restored = flatten(&group(&tasks));
        assert!(restored.iter().all(|t| t.main_task_type == "Work"));
    }

    #[test]
    fn test_group_is_idempotent_under_composition() {
        let once = group(&sample_tasks());
        let twice = group(&flatten(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_time_rounding_never_produces_sixty_minutes() {
        let mut task = Task::new("English", "Work", "a", 1);
        task.estimated_time = 1.999;
        let doc = group(std::iter::once(&task));
        let record = &doc.group("English").unwrap().tasks[0];
        assert_eq!(record.estimated_time_hours, 2);
        assert_eq!(record.estimated_time_minutes, 0);

        let restored = flatten(&doc);
        assert!((restored[0].estimated_time - 1.999).abs() <= 1.0 / 60.0);
    }

    #[test]
    fn test_empty_list_groups_to_empty_document() {
        let doc = group(&Vec::<Task>::new());
        assert!(doc.is_empty());
        assert!(flatten(&doc).is_empty());
    }
}
