//! Projects command: show the project tree

use clap::Args;
use console::style;
use tracing::info;

use gantry_core::{ProjectId, ProjectTree};

use crate::cli::output::{header, key_value, path_style, plural};
use crate::cli::{Cli, OutputFormat};

/// Show the project tree
#[derive(Debug, Args)]
pub struct ProjectsCommand {
    /// Realize every project first so task counts are final
    #[arg(long)]
    pub realize: bool,
}

impl ProjectsCommand {
    /// Execute the projects command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(realize = self.realize, "executing projects command");
        let build = cli.load_build()?;
        let tree = &build.tree;

        if self.realize {
            for id in tree.all_projects_in_tree(tree.root()) {
                tree.realize(id)?;
            }
        }

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "config_path": build.config_path.map(|p| p.to_string_lossy().to_string()),
                    "root": project_json(tree, tree.root())?,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    let root = tree.project(tree.root())?;
                    println!("{}", header(&format!("Project '{}'", root.name())));
                    match &build.config_path {
                        Some(path) => println!("{}", key_value("build file", &path.display().to_string())),
                        None => println!("{}", key_value("build file", "none (using defaults)")),
                    }
                    println!();
                }
                print_project(tree, tree.root(), 0)?;
                if !cli.quiet {
                    println!();
                    println!("{}", style(plural(tree.len(), "project")).dim());
                }
            }
        }

        Ok(())
    }
}

fn print_project(tree: &ProjectTree, id: ProjectId, depth: usize) -> anyhow::Result<()> {
    let project = tree.project(id)?;
    let (registered, pending, realized) = {
        let tasks = project.tasks();
        (tasks.len(), tasks.pending_len(), tasks.is_realized())
    };

    let mut counts = plural(registered, "task");
    if pending > 0 {
        counts.push_str(&format!(", {} deferred", pending));
    }
    if realized {
        counts.push_str(", realized");
    }

    println!(
        "{}{} {}",
        "  ".repeat(depth),
        path_style().apply_to(project.path()),
        style(format!("({})", counts)).dim()
    );

    for child in tree.children(id) {
        print_project(tree, child, depth + 1)?;
    }
    Ok(())
}

fn project_json(tree: &ProjectTree, id: ProjectId) -> anyhow::Result<serde_json::Value> {
    let project = tree.project(id)?;
    let (names, pending, realized) = {
        let tasks = project.tasks();
        (tasks.names(), tasks.pending_len(), tasks.is_realized())
    };

    let children = tree
        .children(id)
        .into_iter()
        .map(|child| project_json(tree, child))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(serde_json::json!({
        "name": project.name(),
        "path": project.path().to_string(),
        "description": project.description(),
        "tasks": names,
        "deferred": pending,
        "realized": realized,
        "children": children,
    }))
}
