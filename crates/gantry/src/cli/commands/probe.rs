//! Probe command: cheap task existence check

use clap::Args;
use tracing::info;

use gantry_core::ProjectTree;
use gantry_tasks::TaskNameResolver;

use crate::cli::output::{success, warning};
use crate::cli::{Cli, OutputFormat};

/// Check whether a task name is already registered, without configuring projects
#[derive(Debug, Args)]
pub struct ProbeCommand {
    /// Unqualified task name
    pub name: String,
}

impl ProbeCommand {
    /// Execute the probe command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(name = %self.name, "executing probe command");
        let build = cli.load_build()?;
        let found = is_registered(&build.tree, &self.name);

        match cli.format {
            OutputFormat::Json => {
                let output = json_report(&self.name, found);
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", found);
                } else if found {
                    success(&format!("Task '{}' is registered", self.name));
                } else {
                    warning(&format!(
                        "Task '{}' is not registered yet; deferred configuration may still create it",
                        self.name
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Cheap check over the whole tree, starting at the root project
fn is_registered(tree: &ProjectTree, name: &str) -> bool {
    TaskNameResolver::new(tree).try_find_unqualified_task_cheaply(name, tree.root())
}

/// A negative answer only covers tasks registered so far
fn json_report(name: &str, found: bool) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "found": found,
        "may_exist_after_realization": !found,
    })
}
