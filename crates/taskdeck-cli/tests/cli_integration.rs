use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn taskdeck() -> Command {
    let mut cmd = Command::cargo_bin("taskdeck").unwrap();
    // Keep the user's config and environment out of the tests.
    cmd.env_remove("TASKDECK_FILE")
        .env_remove("TASKDECK_DEBUG_LOG")
        .env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent");
    cmd
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(&String::from_utf8_lossy(output)).expect("Failed to parse JSON output")
}

fn run(file: &Path, args: &[&str]) -> Value {
    let output = taskdeck()
        .arg("--file")
        .arg(file)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    parse_json_output(&output)
}

fn add_vocabulary(file: &Path) -> Value {
    run(
        file,
        &[
            "add",
            "--main-task",
            "English",
            "--type",
            "Work",
            "--sub-task",
            "Vocabulary",
            "--minutes",
            "30",
            "--item",
            "textbook",
            "--item",
            "extra",
        ],
    )
}

mod task_tests {
    use super::*;

    #[test]
    fn test_add_writes_grouped_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");

        let json = add_vocabulary(&file);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["sub_task"], "Vocabulary");
        assert_eq!(json["data"]["estimated_time"], 0.5);
        assert_eq!(json["data"]["branch_number"], 1);
        assert_eq!(json["data"]["completed"], false);

        let saved: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        let english = &saved["English"];
        assert_eq!(english["Types"][0], "Work");
        assert_eq!(english["sub_task_number"], 1);
        assert_eq!(english["tasks"][0]["estimated_time_minutes"], 30);
        assert_eq!(english["tasks"][0]["sub_task_tasks"]["extra"], false);
    }

    #[test]
    fn test_add_assigns_next_branch() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");

        add_vocabulary(&file);
        let json = run(
            &file,
            &[
                "add",
                "--main-task",
                "English",
                "--type",
                "Work",
                "--sub-task",
                "Dictation",
            ],
        );
        assert_eq!(json["data"]["branch_number"], 2);
    }

    #[test]
    fn test_add_rejects_missing_sub_task() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");

        taskdeck()
            .arg("--file")
            .arg(&file)
            .args(["add", "--main-task", "English", "--type", "Work", "--sub-task", " "])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("sub-task"));
        assert!(!file.exists());
    }

    #[test]
    fn test_list_filters_and_searches() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        add_vocabulary(&file);
        run(
            &file,
            &["add", "--main-task", "Gym", "--type", "Life", "--sub-task", "Legs"],
        );

        let all = run(&file, &["list"]);
        assert_eq!(all["data"]["count"], 2);

        let life = run(&file, &["list", "--type", "Life"]);
        assert_eq!(life["data"]["count"], 1);
        assert_eq!(life["data"]["items"][0]["sub_task"], "Legs");

        let search = run(&file, &["list", "--search", "VOCAB"]);
        assert_eq!(search["data"]["count"], 1);
        assert_eq!(search["data"]["items"][0]["main_task"], "English");
    }

    #[test]
    fn test_complete_check_and_undo() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        add_vocabulary(&file);

        let done = run(&file, &["complete", "--main-task", "English", "--branch", "1"]);
        assert_eq!(done["data"]["completed"], true);

        let checked = run(
            &file,
            &["check", "--main-task", "English", "--branch", "1", "--item", "extra"],
        );
        assert_eq!(checked["data"]["sub_task_tasks"]["extra"], true);
        assert_eq!(checked["data"]["sub_task_tasks"]["textbook"], false);

        let undone = run(
            &file,
            &["complete", "--main-task", "English", "--branch", "1", "--undo"],
        );
        assert_eq!(undone["data"]["completed"], false);
    }

    #[test]
    fn test_complete_missing_task_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        add_vocabulary(&file);

        taskdeck()
            .arg("--file")
            .arg(&file)
            .args(["complete", "--main-task", "English", "--branch", "9"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Task not found: English#9"));
    }

    #[test]
    fn test_remove_backs_up_previous_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        add_vocabulary(&file);

        let json = run(&file, &["remove", "--main-task", "English", "--branch", "1"]);
        assert_eq!(json["data"]["deleted"]["sub_task"], "Vocabulary");

        let list = run(&file, &["list"]);
        assert_eq!(list["data"]["count"], 0);

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".bak"))
            .count();
        assert!(backups >= 1);
    }

    #[test]
    fn test_remove_missing_task_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        add_vocabulary(&file);
        let before = fs::read_to_string(&file).unwrap();

        taskdeck()
            .arg("--file")
            .arg(&file)
            .args(["remove", "--main-task", "Gym", "--branch", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Task not found: Gym#1"));
        assert_eq!(fs::read_to_string(&file).unwrap(), before);
    }

    #[test]
    fn test_invalid_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        fs::write(&file, "{ broken").unwrap();

        taskdeck()
            .arg("--file")
            .arg(&file)
            .args(["add", "--main-task", "A", "--type", "Work", "--sub-task", "B"])
            .assert()
            .failure();
        assert_eq!(fs::read_to_string(&file).unwrap(), "{ broken");
    }

    #[test]
    fn test_file_from_env() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("env.json");

        taskdeck()
            .env("TASKDECK_FILE", &file)
            .args(["add", "--main-task", "A", "--type", "Work", "--sub-task", "B"])
            .assert()
            .success();
        assert!(file.exists());
    }
}

mod render_tests {
    use super::*;

    #[test]
    fn test_render_writes_card_page() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        let out = dir.path().join("cards.html");
        add_vocabulary(&file);

        let json = run(&file, &["render", "--out", out.to_str().unwrap()]);
        assert_eq!(json["data"]["groups"], 1);

        let page = fs::read_to_string(&out).unwrap();
        assert!(page.contains(r#"data-subject="English""#));
        assert!(page.contains("expandAllTasks"));
    }

    #[test]
    fn test_render_without_output_path_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        add_vocabulary(&file);

        taskdeck()
            .arg("--file")
            .arg(&file)
            .arg("render")
            .assert()
            .failure()
            .stderr(predicate::str::contains("No output path"));
    }

    #[test]
    fn test_render_empty_store() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tasks.json");
        let out = dir.path().join("cards.html");

        run(&file, &["render", "--out", out.to_str().unwrap()]);
        assert!(fs::read_to_string(&out)
            .unwrap()
            .contains("No task data to display"));
    }
}

#[test]
fn test_completions() {
    taskdeck()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("taskdeck"));
}
