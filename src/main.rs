use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use eyre::{Result, bail};
use std::path::PathBuf;
use tasktrack::{Priority, Status, Task, TaskStore};

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "Personal task tracker - JSON-backed store with CSV interchange")]
#[command(version)]
struct Cli {
    /// Path to the task file (default: tasks.json in the platform data directory)
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        name: String,
        priority: String,
        due_date: String,
    },

    /// List tasks, optionally filtered by status
    List {
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a single task
    Show { id: u32 },

    /// Edit a task's name, priority, and due date
    Edit {
        id: u32,
        name: String,
        priority: String,
        due_date: String,
    },

    /// Advance a task one lifecycle step
    Push { id: u32 },

    /// Revert a task one lifecycle step
    Undo { id: u32 },

    /// Delete a task
    Remove { id: u32 },

    /// Search tasks by id, name, or status (separate terms with /)
    Search { query: String },

    /// Export all tasks to CSV
    Export {
        #[arg(default_value = "tasks_export.csv")]
        path: PathBuf,
    },

    /// Import tasks from CSV
    Import { path: PathBuf },
}

fn default_store_file() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("tasktrack").join("tasks.json"),
        None => PathBuf::from("tasks.json"),
    }
}

fn paint_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => priority.as_str().red().bold(),
        Priority::Medium => priority.as_str().yellow(),
        Priority::Low => priority.as_str().green(),
    }
}

fn paint_status(status: Status) -> ColoredString {
    match status {
        Status::Todo => status.as_str().blue(),
        Status::InProgress => status.as_str().yellow(),
        Status::Completed => status.as_str().green(),
    }
}

fn print_task(task: &Task) {
    println!(
        "{:>9}  {:<30}  {:<8}  {:<12}  {}",
        task.id,
        task.name,
        paint_priority(task.priority),
        task.due_date,
        paint_status(task.status)
    );
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    println!(
        "{:>9}  {:<30}  {:<8}  {:<12}  {}",
        "ID", "Name", "Priority", "Due Date", "Status"
    );
    for task in tasks {
        print_task(task);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let file = cli.file.unwrap_or_else(default_store_file);
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut store = TaskStore::open(file);

    match cli.command {
        Commands::Add {
            name,
            priority,
            due_date,
        } => {
            let task = store.add(&name, &priority, &due_date)?;
            println!("Added task {}", task.id);
            print_task(&task);
        }
        Commands::List { status } => {
            let status = match status {
                Some(s) => match s.parse::<Status>() {
                    Ok(status) => Some(status),
                    Err(()) => bail!("unrecognized status: {s}"),
                },
                None => None,
            };
            print_tasks(&store.get(status));
        }
        Commands::Show { id } => match store.get_by_id(id) {
            Some(task) => print_task(task),
            None => bail!("task not found"),
        },
        Commands::Edit {
            id,
            name,
            priority,
            due_date,
        } => {
            store.update_fields(id, &name, &priority, &due_date)?;
            println!("Updated task {id}");
        }
        Commands::Push { id } => {
            let status = store.advance_status(id)?;
            println!("Task {id} is now {}", paint_status(status));
        }
        Commands::Undo { id } => {
            let status = store.revert_status(id)?;
            println!("Task {id} is now {}", paint_status(status));
        }
        Commands::Remove { id } => {
            store.remove(id)?;
            println!("Removed task {id}");
        }
        Commands::Search { query } => {
            print_tasks(&store.search(&query));
        }
        Commands::Export { path } => {
            let resolved = store.export(&path)?;
            println!("Exported tasks to {}", resolved.display());
        }
        Commands::Import { path } => {
            let count = store.import(&path)?;
            println!("Imported {count} task(s)");
        }
    }

    Ok(())
}
