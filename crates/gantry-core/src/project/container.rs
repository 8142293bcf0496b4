//! Per-project task containers

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::TaskConfig;
use crate::error::ProjectError;

use super::path::{validate_task_name, ProjectPath};
use super::task::Task;

/// Where a container is in its configuration lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealizationState {
    /// Deferred declarations have not run yet
    Unrealized,
    /// All declarations have run; the task set is final
    Realized,
    /// Realization failed; the failure is reported again on every attempt
    Failed(String),
}

/// Tasks of a single project.
///
/// Before realization `names()` is a partial view holding only eagerly
/// registered tasks. After realization it is authoritative.
#[derive(Debug)]
pub struct TaskContainer {
    project: ProjectPath,
    tasks: IndexMap<String, Arc<Task>>,
    pending: Vec<TaskConfig>,
    state: RealizationState,
}

impl TaskContainer {
    /// Create an empty, unrealized container
    pub fn new(project: ProjectPath) -> Self {
        Self {
            project,
            tasks: IndexMap::new(),
            pending: Vec::new(),
            state: RealizationState::Unrealized,
        }
    }

    /// Register a task immediately
    pub fn register(&mut self, config: &TaskConfig) -> Result<Arc<Task>, ProjectError> {
        validate_task_name(&config.name)?;
        if self.tasks.contains_key(&config.name) {
            return Err(ProjectError::DuplicateTask {
                project: self.project.to_string(),
                task: config.name.clone(),
            });
        }

        let task = Arc::new(Task::from_config(self.project.clone(), config));
        self.tasks.insert(config.name.clone(), Arc::clone(&task));
        Ok(task)
    }

    /// Queue a declaration that only runs when the project is realized
    pub fn defer(&mut self, config: TaskConfig) -> Result<(), ProjectError> {
        validate_task_name(&config.name)?;
        self.pending.push(config);
        Ok(())
    }

    /// Names of the tasks registered so far, in registration order
    pub fn names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    /// Whether a task with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Look up a registered task
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Task>> {
        self.tasks.get(name).cloned()
    }

    /// Registered tasks, in registration order
    pub fn tasks(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.tasks.values()
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are registered
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of deferred declarations still waiting for realization
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Current lifecycle state
    pub fn state(&self) -> &RealizationState {
        &self.state
    }

    /// Whether realization has completed successfully
    pub fn is_realized(&self) -> bool {
        self.state == RealizationState::Realized
    }

    /// Run deferred declarations. Returns `true` when work was done,
    /// `false` when the container was already realized.
    ///
    /// A failure leaves already-registered tasks in place and is
    /// returned again by every later call.
    pub fn realize(&mut self) -> Result<bool, ProjectError> {
        match &self.state {
            RealizationState::Realized => return Ok(false),
            RealizationState::Failed(reason) => {
                return Err(ProjectError::RealizationFailed {
                    project: self.project.to_string(),
                    reason: reason.clone(),
                })
            }
            RealizationState::Unrealized => {}
        }

        let pending = std::mem::take(&mut self.pending);
        debug!(
            project = %self.project,
            deferred = pending.len(),
            "running deferred task declarations"
        );

        for config in &pending {
            if let Err(err) = self.register(config) {
                let reason = err.to_string();
                self.state = RealizationState::Failed(reason.clone());
                return Err(ProjectError::RealizationFailed {
                    project: self.project.to_string(),
                    reason,
                });
            }
        }

        self.state = RealizationState::Realized;
        Ok(true)
    }
}
