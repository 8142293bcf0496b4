//! Tasks command: list task names runnable from a project

use clap::Args;
use console::style;
use tracing::info;

use gantry_tasks::TaskNameResolver;

use crate::cli::output::{header, plural, task_style};
use crate::cli::{Cli, OutputFormat};

/// List the task names runnable from the default project
#[derive(Debug, Args)]
pub struct TasksCommand {
    /// Include tasks of all subprojects
    #[arg(short, long)]
    pub all: bool,
}

impl TasksCommand {
    /// Execute the tasks command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(all = self.all, "executing tasks command");
        let build = cli.load_build()?;
        let project_path = build.tree.project(build.default_project)?.path().clone();

        let resolver = TaskNameResolver::new(&build.tree);
        let selected = resolver.select_all(build.default_project, self.all)?;

        // Names are cheap; owning tasks are only collected when asked for
        let detailed = cli.verbose || cli.format == OutputFormat::Json;
        let mut entries = Vec::with_capacity(selected.len());
        for (name, selection) in &selected {
            let tasks = if detailed {
                selection.tasks()?
            } else {
                Vec::new()
            };
            entries.push((name.clone(), tasks));
        }

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "project": project_path.to_string(),
                    "include_subprojects": self.all,
                    "tasks": entries.iter().map(|(name, tasks)| serde_json::json!({
                        "name": name,
                        "description": tasks.iter().find_map(|t| t.description.clone()),
                        "group": tasks.iter().find_map(|t| t.group.clone()),
                        "paths": tasks.iter().map(|t| t.path()).collect::<Vec<_>>(),
                    })).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    for (name, _) in &entries {
                        println!("{}", name);
                    }
                    return Ok(());
                }

                let scope = if self.all { " and subprojects" } else { "" };
                println!(
                    "{}",
                    header(&format!("Tasks runnable from project '{}'{}", project_path, scope))
                );
                println!();

                if entries.is_empty() {
                    println!("  {}", style("No tasks").dim());
                    return Ok(());
                }

                for (name, tasks) in &entries {
                    let description = tasks.iter().find_map(|t| t.description.as_deref());
                    match description {
                        Some(desc) => println!("  {} - {}", task_style().apply_to(name), desc),
                        None => println!("  {}", task_style().apply_to(name)),
                    }
                    if cli.verbose {
                        for task in tasks {
                            println!("      {}", style(task.path()).dim());
                        }
                    }
                }

                println!();
                println!("{}", style(plural(entries.len(), "task name")).dim());
            }
        }

        Ok(())
    }
}
