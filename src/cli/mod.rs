//! CLI 模块

pub mod edit;
pub mod list;
pub mod seed;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Terminal task board with an inline task editor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Open the task board (default)
    Tui {
        /// Project to open (defaults to ui.default_project, then the first project)
        project: Option<String>,
    },
    /// Create a project with a few demo tasks
    Seed {
        /// Project ID
        project: String,
    },
    /// List the tasks of a project
    List {
        /// Project ID
        project: String,
    },
    /// Update a task's name and/or description without opening the board
    Edit {
        /// Project ID
        project: String,
        /// Task ID
        task: String,
        /// New task name (keeps the current one when omitted)
        #[arg(long)]
        name: Option<String>,
        /// New task description (keeps the current one when omitted)
        #[arg(long)]
        description: Option<String>,
    },
}
