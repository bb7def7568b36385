use crate::cli::{AddArgs, KeyArgs, ListArgs};
use crate::context::CliContext;
use crate::output;
use taskdeck_domain::commands::{AddTask, CommandOutcome, RemoveTask, SetChecklistItem, SetCompleted};
use taskdeck_domain::{Task, TaskDraft, TaskKey, TaskRef, ALL_TYPES};

pub fn add(ctx: &mut CliContext, args: AddArgs) -> anyhow::Result<()> {
    let mut draft = TaskDraft::new(
        args.main_task_type,
        args.weight.unwrap_or(ctx.config.effective_default_weight()),
    );
    draft.main_task = args.main_task;
    draft.sub_task = args.sub_task;
    draft.details = args.details;
    draft.hours = args.hours;
    draft.minutes = args.minutes;
    draft.branch_number = args
        .branch
        .unwrap_or_else(|| ctx.store.next_branch_number(draft.main_task.trim()));
    for item in &args.items {
        draft.add_item(item);
    }

    let task = draft.build()?;
    ctx.execute(&AddTask { task: task.clone() })?;
    ctx.save()?;
    output::output_success(&task);
    Ok(())
}

pub fn list(ctx: &CliContext, args: ListArgs) -> anyhow::Result<()> {
    let main_task_type = args.main_task_type.as_deref().unwrap_or(ALL_TYPES);
    let query = args.search.as_deref().unwrap_or("");
    let tasks: Vec<&Task> = ctx.store.filtered(main_task_type, query);
    output::output_list(tasks);
    Ok(())
}

pub fn complete(ctx: &mut CliContext, key: KeyArgs, completed: bool) -> anyhow::Result<()> {
    let target = target(&key);
    let outcome = ctx.execute(&SetCompleted {
        target: target.clone(),
        completed,
    })?;
    finish(ctx, &key, outcome, &target)
}

pub fn check(
    ctx: &mut CliContext,
    key: KeyArgs,
    item: String,
    completed: bool,
) -> anyhow::Result<()> {
    let target = target(&key);
    let command = SetChecklistItem {
        target: target.clone(),
        item_name: item,
        completed,
    };
    match ctx.execute(&command)? {
        CommandOutcome::Applied => finish(ctx, &key, CommandOutcome::Applied, &target),
        CommandOutcome::Ignored => output::output_error(&format!(
            "Not found: {} or its item '{}'",
            TaskKey::new(key.main_task, key.branch),
            command.item_name
        )),
    }
}

pub fn remove(ctx: &mut CliContext, key: KeyArgs) -> anyhow::Result<()> {
    let target = target(&key);
    let Some(task) = ctx.store.get(&target).cloned() else {
        output::output_error(&format!("Task not found: {}", describe(&key)));
    };
    let command = RemoveTask { target };
    ctx.execute(&command)?;
    ctx.save()?;
    output::output_success(serde_json::json!({ "deleted": task }));
    Ok(())
}

fn target(key: &KeyArgs) -> TaskRef {
    TaskRef::Key(TaskKey::new(key.main_task.clone(), key.branch))
}

fn describe(key: &KeyArgs) -> String {
    TaskKey::new(key.main_task.clone(), key.branch).to_string()
}

/// Saves and prints the updated task, or reports a missing one.
fn finish(
    ctx: &CliContext,
    key: &KeyArgs,
    outcome: CommandOutcome,
    target: &TaskRef,
) -> anyhow::Result<()> {
    if outcome == CommandOutcome::Ignored {
        output::output_error(&format!("Task not found: {}", describe(key)));
    }
    ctx.save()?;
    match ctx.store.get(target) {
        Some(task) => output::output_success(task),
        None => output::output_error(&format!("Task not found: {}", describe(key))),
    }
    Ok(())
}
