//! Task paths as typed by users

use std::fmt;

use gantry_core::project::validate_task_name;
use gantry_core::ProjectPath;

use crate::selector::SelectionError;

/// A requested task: a bare name, or a name qualified by a project path
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct TaskPath {
    /// Project prefix as written (":a:b", "a:b", ":" for the root)
    pub project: Option<String>,
    /// Task name
    pub name: String,
}

impl TaskPath {
    /// Create an unqualified task path
    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            project: None,
            name: name.into(),
        }
    }

    /// Parse "build", ":build", ":a:b:build" or "a:build"
    pub fn parse(s: &str) -> Result<Self, SelectionError> {
        let invalid = |reason: String| SelectionError::InvalidPath {
            path: s.to_string(),
            reason,
        };

        let (project, name) = match s.rsplit_once(ProjectPath::SEPARATOR) {
            None => (None, s),
            Some(("", name)) => (Some(ProjectPath::SEPARATOR.to_string()), name),
            Some((prefix, name)) => (Some(prefix.to_string()), name),
        };

        validate_task_name(name).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            project,
            name: name.to_string(),
        })
    }

    /// Whether a project prefix was given
    pub fn is_qualified(&self) -> bool {
        self.project.is_some()
    }

    /// Resolve the project prefix. Relative prefixes are resolved against
    /// `base`; `None` for unqualified paths.
    pub fn project_path(&self, base: &ProjectPath) -> Result<Option<ProjectPath>, SelectionError> {
        let Some(prefix) = &self.project else {
            return Ok(None);
        };

        let invalid = |reason: String| SelectionError::InvalidPath {
            path: self.to_string(),
            reason,
        };

        if prefix.starts_with(ProjectPath::SEPARATOR) {
            return ProjectPath::parse(prefix)
                .map(Some)
                .map_err(|e| invalid(e.to_string()));
        }

        let mut path = base.clone();
        for segment in prefix.split(ProjectPath::SEPARATOR) {
            if segment.is_empty() {
                return Err(invalid("contains an empty project segment".to_string()));
            }
            path = path.child(segment);
        }

        // Re-parse to apply the same segment rules as absolute paths
        ProjectPath::parse(path.as_str())
            .map(Some)
            .map_err(|e| invalid(e.to_string()))
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.project.as_deref() {
            None => f.write_str(&self.name),
            Some(":") => write!(f, ":{}", self.name),
            Some(project) => write!(f, "{}:{}", project, self.name),
        }
    }
}
