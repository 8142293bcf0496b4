//! Configuration types

use serde::{Deserialize, Serialize};

use super::defaults::DEFAULT_ROOT_NAME;

/// Build description: the project tree and the tasks each project declares
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root project name
    pub name: String,

    /// Project from which unqualified task names are resolved
    pub default_project: String,

    /// Tasks declared on the root project
    pub tasks: Vec<TaskConfig>,

    /// Descendant projects, in declaration order
    pub projects: Vec<ProjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_ROOT_NAME.to_string(),
            default_project: ":".to_string(),
            tasks: Vec::new(),
            projects: Vec::new(),
        }
    }
}

/// A descendant project declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Absolute project path (e.g. ":libs:core")
    pub path: String,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tasks declared on this project
    pub tasks: Vec<TaskConfig>,
}

impl ProjectConfig {
    /// Create a project declaration with no tasks
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a task declaration
    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A task declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Task name, unique within its project
    pub name: String,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Task group (e.g. "build", "verification")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Once matched, this task stands in for same-named tasks of all descendants
    pub implies_subprojects: bool,

    /// Only created when the project is realized
    pub deferred: bool,
}

impl TaskConfig {
    /// Create an eagerly registered task declaration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Mark the task as implying subprojects
    pub fn implying_subprojects(mut self) -> Self {
        self.implies_subprojects = true;
        self
    }

    /// Mark the task as created by deferred configuration
    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    /// Set the group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.name, "root");
        assert_eq!(config.default_project, ":");
        assert!(config.tasks.is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
name: demo
projects:
  - path: ":a"
    tasks:
      - name: check
        implies_subprojects: true
  - path: ":a:b"
    tasks:
      - name: check
        deferred: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.name, "demo");
        assert_eq!(config.projects[1].path, ":a:b");
        assert!(config.projects[0].tasks[0].implies_subprojects);
        assert!(!config.projects[0].tasks[0].deferred);
        assert!(config.projects[1].tasks[0].deferred);
    }

    #[test]
    fn test_task_builder() {
        let task = TaskConfig::new("check")
            .implying_subprojects()
            .with_group("verification");
        assert_eq!(task.name, "check");
        assert!(task.implies_subprojects);
        assert_eq!(task.group.as_deref(), Some("verification"));
        assert!(!task.deferred);
    }
}
