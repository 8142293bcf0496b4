//! Turning requested task paths into tasks

use std::sync::Arc;

use indexmap::IndexSet;
use thiserror::Error;
use tracing::{debug, info};

use gantry_core::{GantryError, ProjectId, ProjectPath, Task};

use crate::model::ProjectModel;
use crate::resolver::TaskNameResolver;
use crate::task::TaskPath;

/// Errors while selecting tasks from user input
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The requested path is malformed
    #[error("Invalid task path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The qualifying project does not exist
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    /// No task with that name
    #[error("Task '{name}' not found in project '{project}'")]
    TaskNotFound {
        name: String,
        project: String,
        /// Task names that do exist there, sorted
        candidates: Vec<String>,
    },

    /// Realizing a project failed
    #[error(transparent)]
    Configuration(#[from] GantryError),
}

/// The tasks one requested path resolved to
#[derive(Debug, Clone)]
pub struct TaskSelection {
    /// The path as requested
    pub requested: TaskPath,
    /// Project the name was resolved from
    pub project: ProjectPath,
    /// Matching tasks, in selection order
    pub tasks: Vec<Arc<Task>>,
}

/// Resolves task paths relative to a default project
pub struct TaskSelector<'m, M: ?Sized> {
    resolver: TaskNameResolver<'m, M>,
    default_project: ProjectId,
    default_path: ProjectPath,
}

impl<'m, M: ProjectModel + ?Sized> TaskSelector<'m, M> {
    /// Create a selector resolving unqualified names from `default_project`
    pub fn new(model: &'m M, default_project: ProjectId) -> Result<Self, SelectionError> {
        let default_path = model
            .project_path(default_project)
            .ok_or_else(|| SelectionError::ProjectNotFound(default_project.to_string()))?;

        Ok(Self {
            resolver: TaskNameResolver::new(model),
            default_project,
            default_path,
        })
    }

    /// The project unqualified names are resolved from
    pub fn default_project(&self) -> &ProjectPath {
        &self.default_path
    }

    /// Resolve one task path.
    ///
    /// Qualified paths select the single task in the named project.
    /// Unqualified names select the task in the default project and all
    /// of its descendants, trying the cheap probe before realizing the
    /// whole subtree for an authoritative answer.
    pub fn select(&self, path: &str) -> Result<TaskSelection, SelectionError> {
        let requested = TaskPath::parse(path)?;

        match requested.project_path(&self.default_path)? {
            Some(project_path) => self.select_qualified(requested, project_path),
            None => self.select_unqualified(requested),
        }
    }

    /// Resolve several task paths into one duplicate-free list, in request order
    pub fn select_all_paths<I, S>(&self, paths: I) -> Result<Vec<Arc<Task>>, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tasks = IndexSet::new();
        for path in paths {
            let selection = self.select(path.as_ref())?;
            tasks.extend(selection.tasks);
        }
        info!(tasks = tasks.len(), "tasks selected");
        Ok(tasks.into_iter().collect())
    }

    fn select_qualified(
        &self,
        requested: TaskPath,
        project_path: ProjectPath,
    ) -> Result<TaskSelection, SelectionError> {
        let model = self.resolver.model();
        let project = model
            .find_project(&project_path)
            .ok_or_else(|| SelectionError::ProjectNotFound(project_path.to_string()))?;

        debug!(task = %requested, project = %project_path, "selecting qualified task");
        match self.resolver.select_with_name(&requested.name, project, false)? {
            Some(result) => Ok(TaskSelection {
                tasks: result.tasks()?,
                requested,
                project: project_path,
            }),
            None => {
                let candidates = sorted_names(model.all_names(project));
                Err(SelectionError::TaskNotFound {
                    name: requested.name,
                    project: project_path.to_string(),
                    candidates,
                })
            }
        }
    }

    fn select_unqualified(&self, requested: TaskPath) -> Result<TaskSelection, SelectionError> {
        let name = requested.name.as_str();

        if self
            .resolver
            .try_find_unqualified_task_cheaply(name, self.default_project)
        {
            debug!(task = name, "cheap probe hit");
            if let Some(result) =
                self.resolver
                    .select_with_name(name, self.default_project, true)?
            {
                return Ok(TaskSelection {
                    tasks: result.tasks()?,
                    requested,
                    project: self.default_path.clone(),
                });
            }
        }

        debug!(task = name, "falling back to full task name lookup");
        let all = self.resolver.select_all(self.default_project, true)?;
        if let Some(result) = all.get(name) {
            return Ok(TaskSelection {
                tasks: result.tasks()?,
                requested,
                project: self.default_path.clone(),
            });
        }

        Err(SelectionError::TaskNotFound {
            name: requested.name,
            project: self.default_path.to_string(),
            candidates: sorted_names(all.into_keys()),
        })
    }
}

fn sorted_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort();
    names.dedup();
    names
}
