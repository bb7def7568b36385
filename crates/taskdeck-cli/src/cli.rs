use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Track main tasks, weighted sub-tasks and checklists", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Path to the task file (or set TASKDECK_FILE env var)
    #[arg(short, long, value_name = "FILE", env = "TASKDECK_FILE", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a sub-task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Mark a sub-task complete
    Complete {
        #[command(flatten)]
        key: KeyArgs,
        /// Mark it incomplete instead
        #[arg(long)]
        undo: bool,
    },
    /// Tick a checklist item
    Check {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long)]
        item: String,
        /// Untick instead
        #[arg(long)]
        undo: bool,
    },
    /// Remove a sub-task
    Remove {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// Write the card view as an HTML page
    Render {
        /// Output path; defaults to `card_html` from the config file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Identifies a sub-task by main task and branch number.
#[derive(Args)]
pub struct KeyArgs {
    #[arg(long)]
    pub main_task: String,
    #[arg(long)]
    pub branch: u32,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub main_task: String,
    #[arg(long = "type")]
    pub main_task_type: String,
    #[arg(long)]
    pub sub_task: String,
    #[arg(long, default_value = "")]
    pub details: String,
    #[arg(long, default_value_t = 0)]
    pub hours: u32,
    #[arg(long, default_value_t = 0)]
    pub minutes: u32,
    /// Defaults to one past the highest branch under the main task
    #[arg(long)]
    pub branch: Option<u32>,
    #[arg(long)]
    pub weight: Option<u8>,
    /// Checklist item; repeat for several
    #[arg(long = "item")]
    pub items: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Category to show, or "all"
    #[arg(long = "type")]
    pub main_task_type: Option<String>,
    /// Case-insensitive text to look for
    #[arg(long)]
    pub search: Option<String>,
}
