//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::project::{validate_task_name, ProjectPath};

use super::types::{Config, TaskConfig};

/// Validate a build description
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating build description");
    validate_root(config)?;
    validate_projects(config)?;
    debug!("build description validation passed");
    Ok(())
}

fn validate_root(config: &Config) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(invalid("name", "root project name cannot be empty"));
    }

    ProjectPath::parse(&config.default_project)
        .map_err(|e| invalid("default_project", &e.to_string()))?;

    validate_tasks("tasks", &config.tasks)
}

fn validate_projects(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();

    for (idx, project) in config.projects.iter().enumerate() {
        let field = format!("projects[{}]", idx);
        let path = ProjectPath::parse(&project.path)
            .map_err(|e| invalid(&format!("{}.path", field), &e.to_string()))?;

        if path.is_root() {
            return Err(invalid(
                &format!("{}.path", field),
                "the root project is declared by the top-level `tasks` table",
            ));
        }

        if !seen.insert(path.clone()) {
            return Err(invalid(
                &format!("{}.path", field),
                &format!("project '{}' is declared more than once", path),
            ));
        }

        validate_tasks(&format!("{}.tasks", field), &project.tasks)?;
    }

    Ok(())
}

/// Eager tasks must be unique; collisions involving deferred tasks surface at realization
fn validate_tasks(field: &str, tasks: &[TaskConfig]) -> Result<()> {
    let mut eager = HashSet::new();

    for (idx, task) in tasks.iter().enumerate() {
        validate_task_name(&task.name)
            .map_err(|e| invalid(&format!("{}[{}].name", field, idx), &e.to_string()))?;

        if !task.deferred && !eager.insert(task.name.as_str()) {
            return Err(invalid(
                &format!("{}[{}].name", field, idx),
                &format!("task '{}' is declared more than once", task.name),
            ));
        }
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::GantryError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
