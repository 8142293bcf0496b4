//! Realized task instances

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::config::TaskConfig;

use super::path::ProjectPath;

/// A task owned by a project's container.
///
/// Two tasks are the same task when they share owning project and name.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    /// Task name, unique within the owning project
    pub name: String,
    /// Owning project
    pub project: ProjectPath,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Task group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Once matched, stands in for same-named tasks of all descendant projects
    pub implies_subprojects: bool,
}

impl Task {
    /// Create a task with no description or group
    pub fn new(project: ProjectPath, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project,
            description: None,
            group: None,
            implies_subprojects: false,
        }
    }

    /// Create a task from its declaration
    pub fn from_config(project: ProjectPath, config: &TaskConfig) -> Self {
        Self {
            name: config.name.clone(),
            project,
            description: config.description.clone(),
            group: config.group.clone(),
            implies_subprojects: config.implies_subprojects,
        }
    }

    /// Fully qualified task path (e.g. ":a:b:build")
    pub fn path(&self) -> String {
        self.project.task_path(&self.name)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.project == other.project && self.name == other.name
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.project.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_path_display() {
        let task = Task::new(ProjectPath::parse(":a").unwrap(), "build");
        assert_eq!(task.to_string(), ":a:build");
    }

    #[test]
    fn test_identity_ignores_flags() {
        let project = ProjectPath::parse(":a").unwrap();
        let plain = Task::new(project.clone(), "check");
        let config = TaskConfig::new("check").implying_subprojects();
        let implied = Task::from_config(project, &config);
        assert_eq!(plain, implied);
        assert!(implied.implies_subprojects);
    }

    #[test]
    fn test_same_name_different_project() {
        let a = Task::new(ProjectPath::parse(":a").unwrap(), "build");
        let b = Task::new(ProjectPath::parse(":b").unwrap(), "build");
        assert_ne!(a, b);
    }
}
