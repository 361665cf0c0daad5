mod config;
mod date;
mod error;
mod task;
mod task_store;
mod ui;

use clap::{Parser, Subcommand};
use config::StoreConfig;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, process::ExitCode};
use task_store::TaskStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(version)]
#[command(about = "Personal task tracker backed by a JSON file")]
struct Cli {
    /// Task file to read and write [default: tasks.json]
    #[arg(short, long, env = "TASKS_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        description: String,
        /// Due date, YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// Priority, conventionally 1-5
        #[arg(short, long, default_value_t = 1)]
        priority: i64,
    },
    /// List all tasks
    List,
    /// Mark the task at POSITION as complete
    Done { position: usize },
    /// Remove the task at POSITION
    Remove { position: usize },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // A store that cannot be loaded must not be used or overwritten.
    let mut store = match TaskStore::initialize(store_config(cli.file)) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &mut store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn store_config(file: Option<PathBuf>) -> StoreConfig {
    file.map(StoreConfig::new).unwrap_or_default()
}

fn run(command: Option<Commands>, store: &mut TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Some(Commands::Add {
            description,
            due,
            priority,
        }) => {
            store.add(description, due.as_deref(), priority)?;
            println!("{}", ui::ADDED);
        }
        Some(Commands::List) => {
            if store.is_empty() {
                println!("{}", ui::NO_TASKS);
            }
            for (position, task) in store.list() {
                println!("{}", ui::format_row(position, task));
            }
        }
        Some(Commands::Done { position }) => {
            store.mark_complete(position)?;
            println!("{}", ui::COMPLETED);
        }
        Some(Commands::Remove { position }) => {
            store.remove(position)?;
            println!("{}", ui::REMOVED);
        }
        None => run_interactive(store)?,
    }
    Ok(())
}

fn run_interactive(store: &mut TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let result = draw_app(store);

    // Restore terminal, whatever happened above
    let mut leave_screen = || execute!(io::stdout(), LeaveAlternateScreen, Show);
    let restored = run_all([
        &mut disable_raw_mode as RestoreStep,
        &mut leave_screen as RestoreStep,
    ]);

    result?;
    restored?;
    Ok(())
}

fn draw_app(store: &mut TaskStore) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    ui::run_app(&mut terminal, store)
}

type RestoreStep<'a> = &'a mut dyn FnMut() -> io::Result<()>;

/// Runs every step even when an earlier one fails; returns the first error.
fn run_all<const N: usize>(steps: [RestoreStep<'_>; N]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(err) = step() {
            if first.is_ok() {
                first = Err(err);
            }
        }
    }
    first
}
