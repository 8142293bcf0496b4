//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use gantry_core::config::load_config_or_default;
use gantry_core::{ProjectId, ProjectPath, ProjectTree};

use commands::{CompletionsCommand, ProbeCommand, ProjectsCommand, SelectCommand, TasksCommand};

/// Gantry - Resolve task names across a multi-project build
#[derive(Debug, Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Project to resolve unqualified task names from (e.g. ":app")
    #[arg(short, long, global = true, env = "GANTRY_PROJECT")]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the task names runnable from the default project
    Tasks(TasksCommand),

    /// Resolve task names or paths to concrete tasks
    Select(SelectCommand),

    /// Check whether a task name is already registered, without configuring projects
    Probe(ProbeCommand),

    /// Show the project tree
    Projects(ProjectsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// A build description evaluated into a project tree
pub struct LoadedBuild {
    /// The project tree
    pub tree: ProjectTree,
    /// Project unqualified names are resolved from
    pub default_project: ProjectId,
    /// Build description file, `None` when running on defaults
    pub config_path: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot enter directory {}", dir.display()))?;
        }

        match self.command {
            Commands::Tasks(ref cmd) => cmd.execute(&self),
            Commands::Select(ref cmd) => cmd.execute(&self),
            Commands::Probe(ref cmd) => cmd.execute(&self),
            Commands::Projects(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the build description from the working directory and build its tree
    pub fn load_build(&self) -> anyhow::Result<LoadedBuild> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;

        let tree = ProjectTree::from_config(&config)?;

        let requested = self.project.as_deref().unwrap_or(&config.default_project);
        let path = ProjectPath::parse(requested)?;
        let default_project = tree
            .find(&path)
            .ok_or_else(|| gantry_tasks::SelectionError::ProjectNotFound(path.to_string()))?;

        debug!(
            projects = tree.len(),
            default_project = %path,
            "build loaded"
        );

        Ok(LoadedBuild {
            tree,
            default_project,
            config_path,
        })
    }
}
