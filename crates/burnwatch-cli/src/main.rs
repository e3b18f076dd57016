//! burnwatch CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "burnwatch",
    version,
    about = "Track mood, stress and coursework, and watch for burnout"
)]
struct Cli {
    /// Data directory (overrides config and BURNWATCH_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file and data directory
    Init,

    /// Show or edit the student profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Log and review mood/stress entries
    Mood {
        #[command(subcommand)]
        action: MoodAction,
    },

    /// Manage academic tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Generate the weekly report
    Report {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long, conflicts_with = "export")]
        output: Option<PathBuf>,

        /// Write the report to weekly_report_<date>.txt in the report directory
        #[arg(long)]
        export: bool,
    },

    /// Show the detailed burnout risk analysis
    Analyze,

    /// Copy every data file to <file>.backup
    Backup {
        /// Delete the data files after backing them up
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create or replace the profile
    Set {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, allow_negative_numbers = true)]
        age: i64,
        #[arg(long, default_value = "")]
        course: String,
    },
    /// Change contact details of the existing profile
    Edit {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        course: Option<String>,
    },
    /// Print the profile
    Show,
}

#[derive(Subcommand)]
pub enum MoodAction {
    /// Log how you feel right now
    Add {
        /// Mood, 1 (very low) to 10 (great)
        #[arg(long, allow_negative_numbers = true)]
        mood: i64,
        /// Stress, 1 (minimal) to 10 (very high)
        #[arg(long, allow_negative_numbers = true)]
        stress: i64,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Show the most recent entries
    History {
        /// Number of entries (defaults to history_limit from config)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// High, Medium or Low
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List tasks by priority, then due date
    List {
        /// Only tasks with this status
        #[arg(long)]
        status: Option<String>,
        /// Only tasks with this priority
        #[arg(long)]
        priority: Option<String>,
        /// Only unfinished tasks due within the configured look-ahead
        #[arg(long)]
        upcoming: bool,
    },
    /// Change fields of an existing task
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD, or "none" to clear it
        #[arg(long)]
        due: Option<String>,
        /// High, Medium, Low, or "none" to clear it
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark a task completed
    Done { id: String },
    /// Delete a task
    Remove { id: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "burnwatch_core=info,burnwatch_report=info,burnwatch=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();

    let result = config::load_config_from(cli.config.as_deref()).and_then(|mut config| {
        if let Some(dir) = cli.data_dir {
            config.data_dir = dir;
        }
        match cli.command {
            Commands::Init => commands::init::execute(&config),
            Commands::Profile { action } => commands::profile::execute(&config, action),
            Commands::Mood { action } => commands::mood::execute(&config, action),
            Commands::Task { action } => commands::task::execute(&config, action),
            Commands::Report {
                format,
                output,
                export,
            } => commands::report::execute(&config, &format, output, export),
            Commands::Analyze => commands::analyze::execute(&config),
            Commands::Backup { clear } => commands::backup::execute(&config, clear),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
