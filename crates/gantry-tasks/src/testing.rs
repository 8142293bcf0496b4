//! In-memory `ProjectModel` for resolver tests

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use gantry_core::{ProjectError, ProjectId, ProjectPath, Result, Task};

use crate::model::ProjectModel;

struct FakeProject {
    path: ProjectPath,
    children: Vec<ProjectId>,
    registered: RefCell<Vec<Arc<Task>>>,
    deferred: RefCell<Vec<Arc<Task>>>,
    failure: Option<String>,
    realized: Cell<bool>,
    realize_calls: Cell<usize>,
}

/// Project tree whose realization is scripted and counted
pub(crate) struct FakeModel {
    projects: Vec<FakeProject>,
}

impl FakeModel {
    pub(crate) const ROOT: ProjectId = ProjectId::ROOT;

    pub(crate) fn new() -> Self {
        Self {
            projects: vec![FakeProject::new(ProjectPath::root())],
        }
    }

    pub(crate) fn add_project(&mut self, parent: ProjectId, name: &str) -> ProjectId {
        let path = self.projects[parent.index()].path.child(name);
        let id = ProjectId::from_index(self.projects.len());
        self.projects.push(FakeProject::new(path));
        self.projects[parent.index()].children.push(id);
        id
    }

    /// Task visible before realization
    pub(crate) fn task(&mut self, project: ProjectId, name: &str, implies_subprojects: bool) {
        let task = self.make_task(project, name, implies_subprojects);
        self.projects[project.index()].registered.borrow_mut().push(task);
    }

    /// Task created only by realization
    pub(crate) fn deferred_task(&mut self, project: ProjectId, name: &str, implies_subprojects: bool) {
        let task = self.make_task(project, name, implies_subprojects);
        self.projects[project.index()].deferred.borrow_mut().push(task);
    }

    /// Make every realization of `project` fail
    pub(crate) fn fail(&mut self, project: ProjectId, reason: &str) {
        self.projects[project.index()].failure = Some(reason.to_string());
    }

    /// Add a task after construction, as later configuration would
    pub(crate) fn register_late(&self, project: ProjectId, name: &str) {
        let task = self.make_task(project, name, false);
        self.projects[project.index()].registered.borrow_mut().push(task);
    }

    pub(crate) fn realize_calls(&self, project: ProjectId) -> usize {
        self.projects[project.index()].realize_calls.get()
    }

    pub(crate) fn total_realize_calls(&self) -> usize {
        self.projects.iter().map(|p| p.realize_calls.get()).sum()
    }

    pub(crate) fn is_realized(&self, project: ProjectId) -> bool {
        self.projects[project.index()].realized.get()
    }

    fn make_task(&self, project: ProjectId, name: &str, implies_subprojects: bool) -> Arc<Task> {
        let mut task = Task::new(self.projects[project.index()].path.clone(), name);
        task.implies_subprojects = implies_subprojects;
        Arc::new(task)
    }
}

impl FakeProject {
    fn new(path: ProjectPath) -> Self {
        Self {
            path,
            children: Vec::new(),
            registered: RefCell::new(Vec::new()),
            deferred: RefCell::new(Vec::new()),
            failure: None,
            realized: Cell::new(false),
            realize_calls: Cell::new(0),
        }
    }
}

impl ProjectModel for FakeModel {
    fn realize(&self, project: ProjectId) -> Result<()> {
        let p = &self.projects[project.index()];
        p.realize_calls.set(p.realize_calls.get() + 1);

        if let Some(reason) = &p.failure {
            return Err(ProjectError::RealizationFailed {
                project: p.path.to_string(),
                reason: reason.clone(),
            }
            .into());
        }

        if !p.realized.get() {
            let deferred = std::mem::take(&mut *p.deferred.borrow_mut());
            p.registered.borrow_mut().extend(deferred);
            p.realized.set(true);
        }
        Ok(())
    }

    fn registered_names(&self, project: ProjectId) -> Vec<String> {
        self.projects[project.index()]
            .registered
            .borrow()
            .iter()
            .map(|t| t.name.clone())
            .collect()
    }

    fn find_task(&self, project: ProjectId, name: &str) -> Option<Arc<Task>> {
        self.projects[project.index()]
            .registered
            .borrow()
            .iter()
            .find(|t| t.name == name)
            .cloned()
    }

    fn all_names(&self, project: ProjectId) -> Vec<String> {
        self.registered_names(project)
    }

    fn child_projects(&self, project: ProjectId) -> Vec<ProjectId> {
        self.projects[project.index()].children.clone()
    }

    fn all_projects_in_tree(&self, project: ProjectId) -> Vec<ProjectId> {
        let mut result = vec![project];
        for child in self.child_projects(project) {
            result.extend(self.all_projects_in_tree(child));
        }
        result
    }

    fn project_path(&self, project: ProjectId) -> Option<ProjectPath> {
        self.projects.get(project.index()).map(|p| p.path.clone())
    }

    fn find_project(&self, path: &ProjectPath) -> Option<ProjectId> {
        self.projects
            .iter()
            .position(|p| &p.path == path)
            .map(ProjectId::from_index)
    }
}

/// Paths of collected tasks, for compact assertions
pub(crate) fn paths(tasks: &[Arc<Task>]) -> Vec<String> {
    tasks.iter().map(|t| t.path()).collect()
}
