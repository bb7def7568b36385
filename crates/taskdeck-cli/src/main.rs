mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use taskdeck_core::AppConfig;
use taskdeck_tui::App;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TASKDECK_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(file) = cli.file {
        config = config.with_data_file(file);
    }

    match cli.command {
        None => {
            let mut app = App::new(config);
            app.auto_load();
            app.run().await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "taskdeck", &mut std::io::stdout());
        }
        Some(cmd) => {
            if let Err(e) = run_command(config, cmd) {
                output::output_error(&e.to_string());
            }
        }
    }

    Ok(())
}

fn run_command(config: AppConfig, cmd: Commands) -> anyhow::Result<()> {
    let mut ctx = CliContext::load(config)?;

    match cmd {
        Commands::Add(args) => handlers::task::add(&mut ctx, args),
        Commands::List(args) => handlers::task::list(&ctx, args),
        Commands::Complete { key, undo } => handlers::task::complete(&mut ctx, key, !undo),
        Commands::Check { key, item, undo } => handlers::task::check(&mut ctx, key, item, !undo),
        Commands::Remove { key } => handlers::task::remove(&mut ctx, key),
        Commands::Render { out } => handlers::render::handle(&ctx, out),
        Commands::Completions { .. } => Ok(()),
    }
}
