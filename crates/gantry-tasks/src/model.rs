//! The project model seen by the resolver
//!
//! Realization is a side-effecting black box. The resolver only needs the
//! operations below, so its algorithms stay independent of how projects
//! are configured and can be exercised against an in-memory fake.

use std::sync::Arc;

use gantry_core::{ProjectId, ProjectPath, ProjectTree, Result, Task};

/// Read access to a project tree plus the ability to realize projects
pub trait ProjectModel {
    /// Run a project's configuration so its task set is final.
    /// Must be idempotent; failures are returned unchanged to the caller.
    fn realize(&self, project: ProjectId) -> Result<()>;

    /// Task names known without realizing the project (may be incomplete)
    fn registered_names(&self, project: ProjectId) -> Vec<String>;

    /// Look up a task by exact name (authoritative after realization)
    fn find_task(&self, project: ProjectId, name: &str) -> Option<Arc<Task>>;

    /// All task names (authoritative after realization)
    fn all_names(&self, project: ProjectId) -> Vec<String>;

    /// Immediate children, in declaration order
    fn child_projects(&self, project: ProjectId) -> Vec<ProjectId>;

    /// The project followed by every known descendant
    fn all_projects_in_tree(&self, project: ProjectId) -> Vec<ProjectId>;

    /// Path of a project, `None` if it is not part of the model
    fn project_path(&self, project: ProjectId) -> Option<ProjectPath>;

    /// Find a project by path
    fn find_project(&self, path: &ProjectPath) -> Option<ProjectId>;
}

impl ProjectModel for ProjectTree {
    fn realize(&self, project: ProjectId) -> Result<()> {
        ProjectTree::realize(self, project)?;
        Ok(())
    }

    fn registered_names(&self, project: ProjectId) -> Vec<String> {
        self.get(project)
            .map(|p| p.tasks().names())
            .unwrap_or_default()
    }

    fn find_task(&self, project: ProjectId, name: &str) -> Option<Arc<Task>> {
        self.get(project)?.tasks().find_by_name(name)
    }

    fn all_names(&self, project: ProjectId) -> Vec<String> {
        self.registered_names(project)
    }

    fn child_projects(&self, project: ProjectId) -> Vec<ProjectId> {
        self.children(project)
    }

    fn all_projects_in_tree(&self, project: ProjectId) -> Vec<ProjectId> {
        ProjectTree::all_projects_in_tree(self, project)
    }

    fn project_path(&self, project: ProjectId) -> Option<ProjectPath> {
        self.get(project).map(|p| p.path().clone())
    }

    fn find_project(&self, path: &ProjectPath) -> Option<ProjectId> {
        self.find(path)
    }
}
