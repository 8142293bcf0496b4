//! Select command: resolve task paths to concrete tasks

use std::sync::Arc;

use clap::Args;
use console::style;
use indexmap::IndexSet;
use tracing::info;

use gantry_core::Task;
use gantry_tasks::TaskSelector;

use crate::cli::output::{header, info as print_info, path_style, plural, task_style};
use crate::cli::{Cli, OutputFormat};

/// Resolve task names or paths to concrete tasks
#[derive(Debug, Args)]
pub struct SelectCommand {
    /// Task names (`build`) or paths (`:app:build`, `app:build`)
    #[arg(required = true)]
    pub paths: Vec<String>,
}

impl SelectCommand {
    /// Execute the select command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(paths = ?self.paths, "executing select command");
        let build = cli.load_build()?;
        let selector = TaskSelector::new(&build.tree, build.default_project)?;

        let mut selections = Vec::with_capacity(self.paths.len());
        let mut all: IndexSet<Arc<Task>> = IndexSet::new();
        for path in &self.paths {
            let selection = selector.select(path)?;
            all.extend(selection.tasks.iter().cloned());
            selections.push(selection);
        }

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "default_project": selector.default_project().to_string(),
                    "selections": selections.iter().map(|s| serde_json::json!({
                        "requested": s.requested.to_string(),
                        "project": s.project.to_string(),
                        "tasks": s.tasks.iter().map(|t| t.path()).collect::<Vec<_>>(),
                    })).collect::<Vec<_>>(),
                    "tasks": all.iter().map(|t| t.as_ref()).collect::<Vec<&Task>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    for task in &all {
                        println!("{}", task.path());
                    }
                    return Ok(());
                }

                for selection in &selections {
                    println!(
                        "{} {}",
                        header(&selection.requested.to_string()),
                        style(format!("(from {})", path_style().apply_to(&selection.project))).dim()
                    );
                    for task in &selection.tasks {
                        let marker = if task.implies_subprojects {
                            style(" [implies subprojects]").yellow().to_string()
                        } else {
                            String::new()
                        };
                        println!("  {}{}", task_style().apply_to(task.path()), marker);
                    }
                }

                println!();
                print_info(&format!("{} selected", plural(all.len(), "task")));
            }
        }

        Ok(())
    }
}
