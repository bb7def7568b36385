use pretty_assertions::assert_eq;
use serde_json::Value;
use taskdeck_domain::{Checklist, Task, TaskDraft, TaskStore};
use taskdeck_persistence::{JsonFileStore, LoadOutcome, PersistenceStore};
use tempfile::tempdir;

fn load_tasks(store: &JsonFileStore) -> Vec<Task> {
    match store.load() {
        LoadOutcome::Loaded(tasks) => tasks,
        other => panic!("expected tasks, got {:?}", other),
    }
}

#[test]
fn test_add_save_reload_scenario() {
    let dir = tempdir().unwrap();
    let file = JsonFileStore::new(dir.path().join("tasks.json"));

    let mut store = TaskStore::new();
    let task = TaskDraft {
        main_task: "English".to_string(),
        main_task_type: "Work".to_string(),
        sub_task: "Vocabulary".to_string(),
        hours: 0,
        minutes: 30,
        branch_number: 1,
        weight: 10,
        ..TaskDraft::default()
    }
    .build()
    .unwrap();
    store.add(task);
    file.save(store.tasks()).unwrap();

    let fresh = TaskStore::from_tasks(load_tasks(&file));
    assert_eq!(fresh.len(), 1);
    let loaded = &fresh.tasks()[0];
    assert_eq!(loaded.estimated_time, 0.5);
    assert_eq!(loaded.branch_number, 1);
    assert!(!loaded.completed);
    assert_eq!(loaded.main_task_type, "Work");
    assert_eq!(loaded.weight, 10);
}

#[test]
fn test_round_trip_preserves_fields() {
    let dir = tempdir().unwrap();
    let file = JsonFileStore::new(dir.path().join("tasks.json"));

    let mut done = Task::new("Chinese", "Study", "Poems", 1)
        .with_details("Grade 8, all of book one")
        .with_time(1, 30)
        .with_weight(13)
        .with_checklist(Checklist::from_items(["1-9", "10-18"]));
    done.completed = true;
    done.checklist.set("10-18", true);

    let tasks = vec![
        Task::new("English", "Work", "Dictation", 2).with_time(0, 10),
        done.clone(),
        Task::new("English", "Work", "Vocabulary", 1).with_time(0, 11),
    ];
    file.save(&tasks).unwrap();

    let loaded = load_tasks(&file);
    let subs: Vec<_> = loaded.iter().map(|t| t.sub_task.as_str()).collect();
    assert_eq!(subs, vec!["Vocabulary", "Dictation", "Poems"]);
    assert_eq!(loaded[2], done);
    for (original, restored) in [(&tasks[2], &loaded[0]), (&tasks[0], &loaded[1])] {
        assert!((original.estimated_time - restored.estimated_time).abs() <= 1.0 / 60.0);
    }
}

#[test]
fn test_written_document_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let file = JsonFileStore::new(&path);
    file.save(&[
        Task::new("English", "Work", "Vocabulary", 2).with_time(2, 5),
        Task::new("English", "Study", "Grammar", 1),
    ])
    .unwrap();

    let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let english = &value["English"];
    assert_eq!(english["Types"], serde_json::json!(["Work", "Study"]));
    assert_eq!(english["describe"], "");
    assert_eq!(english["sub_task_number"], 2);
    assert_eq!(english["tasks"][0]["branch_number"], 1);
    assert_eq!(english["tasks"][1]["estimated_time_hours"], 2);
    assert_eq!(english["tasks"][1]["estimated_time_minutes"], 5);
    assert_eq!(english["tasks"][1]["sub_task_tasks"], serde_json::json!({}));
}

#[test]
fn test_legacy_file_normalizes_checklists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"{
            "English": {
                "Types": [],
                "describe": "",
                "tasks": [
                    {
                        "branch_number": 1,
                        "sub_task_name": "Vocabulary",
                        "details": "",
                        "sub_task_tasks": ["textbook", "extra"],
                        "completed": false
                    }
                ],
                "sub_task_number": 1
            }
        }"#,
    )
    .unwrap();

    let mut store = TaskStore::from_tasks(load_tasks(&JsonFileStore::new(&path)));
    let key = taskdeck_domain::TaskRef::Key(taskdeck_domain::TaskKey::new("English", 1));
    assert!(store.toggle_subtask(&key, "extra", true));

    let task = store.get(&key).unwrap();
    assert_eq!(task.main_task_type, "");
    assert_eq!(task.weight, 10);
    assert_eq!(task.checklist.get("extra"), Some(true));
    assert_eq!(task.checklist.get("textbook"), Some(false));
}

#[test]
fn test_empty_document_loads_empty_list() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "{}").unwrap();
    assert_eq!(JsonFileStore::new(&path).load(), LoadOutcome::Loaded(vec![]));
}

#[test]
fn test_huge_hours_saturate_instead_of_failing_the_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"{"Essay": {"Types": ["Work"], "tasks": [
            {"branch_number": 1, "sub_task_name": "Draft",
             "estimated_time_hours": 4294967295, "estimated_time_minutes": 60}
        ]}}"#,
    )
    .unwrap();

    let tasks = load_tasks(&JsonFileStore::new(&path));
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].time().hours, u32::MAX);
    assert!(tasks[0].time().minutes < 60);
}

#[test]
fn test_out_of_range_weights_are_clamped_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"{"Gym": {"Types": ["Life"], "tasks": [
            {"branch_number": 1, "sub_task_name": "Legs", "weight": 0},
            {"branch_number": 2, "sub_task_name": "Arms", "weight": 300},
            {"branch_number": 3, "sub_task_name": "Core", "weight": 55}
        ]}}"#,
    )
    .unwrap();

    let weights: Vec<u8> = load_tasks(&JsonFileStore::new(&path))
        .iter()
        .map(|task| task.weight)
        .collect();
    assert_eq!(weights, vec![1, 100, 55]);
}
