//! The project tree

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use tracing::{debug, info, instrument, trace};

use crate::config::{validate_config, Config, TaskConfig};
use crate::error::{ProjectError, Result};

use super::container::TaskContainer;
use super::path::ProjectPath;
use super::task::Task;

/// Handle to a project in a `ProjectTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(usize);

impl ProjectId {
    /// The root project of every tree
    pub const ROOT: ProjectId = ProjectId(0);

    /// Id for the project at `index` in an arena-backed model
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position in the tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A project: a named node owning child projects and one task container
#[derive(Debug)]
pub struct Project {
    id: ProjectId,
    name: String,
    path: ProjectPath,
    description: Option<String>,
    parent: Option<ProjectId>,
    children: IndexMap<String, ProjectId>,
    tasks: Mutex<TaskContainer>,
}

impl Project {
    fn new(id: ProjectId, name: String, path: ProjectPath, parent: Option<ProjectId>) -> Self {
        let tasks = Mutex::new(TaskContainer::new(path.clone()));
        Self {
            id,
            name,
            path,
            description: None,
            parent,
            children: IndexMap::new(),
            tasks,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &ProjectPath {
        &self.path
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parent(&self) -> Option<ProjectId> {
        self.parent
    }

    /// Child projects by name, in declaration order
    pub fn children(&self) -> &IndexMap<String, ProjectId> {
        &self.children
    }

    /// Lock this project's task container
    pub fn tasks(&self) -> MutexGuard<'_, TaskContainer> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tasks_mut(&mut self) -> &mut TaskContainer {
        self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Arena of projects rooted at `ProjectId::ROOT`.
///
/// Structure is fixed once built; only task containers change afterwards,
/// each under its own lock, so the tree can be shared across threads.
#[derive(Debug)]
pub struct ProjectTree {
    projects: Vec<Project>,
    by_path: HashMap<ProjectPath, ProjectId>,
}

impl ProjectTree {
    /// Create a tree holding only a root project
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Project::new(ProjectId::ROOT, root_name.into(), ProjectPath::root(), None);
        let mut by_path = HashMap::new();
        by_path.insert(ProjectPath::root(), ProjectId::ROOT);
        Self {
            projects: vec![root],
            by_path,
        }
    }

    /// Evaluate a build description into a tree.
    ///
    /// Intermediate projects missing from the description are created on
    /// first mention. Deferred tasks are queued, not registered.
    #[instrument(skip_all, fields(root = %config.name, projects = config.projects.len()))]
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_config(config)?;

        let mut tree = Self::new(config.name.clone());
        tree.declare_tasks(ProjectId::ROOT, &config.tasks)?;

        for project in &config.projects {
            let path = ProjectPath::parse(&project.path)?;
            let id = tree.ensure_project(&path);
            if project.description.is_some() {
                tree.projects[id.0].description = project.description.clone();
            }
            tree.declare_tasks(id, &project.tasks)?;
        }

        info!(projects = tree.len(), "project tree built");
        Ok(tree)
    }

    fn declare_tasks(&mut self, id: ProjectId, tasks: &[TaskConfig]) -> Result<()> {
        for task in tasks {
            if task.deferred {
                self.add_deferred_task(id, task.clone())?;
            } else {
                self.register_task(id, task)?;
            }
        }
        Ok(())
    }

    /// Add a project at `path`, creating missing ancestors.
    /// Fails if the project already exists.
    pub fn add_project(&mut self, path: &ProjectPath) -> std::result::Result<ProjectId, ProjectError> {
        if self.by_path.contains_key(path) {
            return Err(ProjectError::DuplicateProject(path.to_string()));
        }
        Ok(self.ensure_project(path))
    }

    fn ensure_project(&mut self, path: &ProjectPath) -> ProjectId {
        if let Some(id) = self.by_path.get(path) {
            return *id;
        }

        let parent_path = path.parent().unwrap_or_else(ProjectPath::root);
        let parent = self.ensure_project(&parent_path);
        let name = path.name().unwrap_or_default().to_string();

        let id = ProjectId(self.projects.len());
        self.projects
            .push(Project::new(id, name.clone(), path.clone(), Some(parent)));
        self.projects[parent.0].children.insert(name, id);
        self.by_path.insert(path.clone(), id);

        debug!(project = %path, %id, "project added");
        id
    }

    /// Register a task on a project immediately
    pub fn register_task(
        &mut self,
        id: ProjectId,
        task: &TaskConfig,
    ) -> std::result::Result<Arc<Task>, ProjectError> {
        self.project_mut(id)?.tasks_mut().register(task)
    }

    /// Queue a task that the project creates when realized
    pub fn add_deferred_task(
        &mut self,
        id: ProjectId,
        task: TaskConfig,
    ) -> std::result::Result<(), ProjectError> {
        self.project_mut(id)?.tasks_mut().defer(task)
    }

    /// The root project id
    pub fn root(&self) -> ProjectId {
        ProjectId::ROOT
    }

    /// Look up a project by id
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(id.0)
    }

    /// Look up a project by id, failing when absent
    pub fn project(&self, id: ProjectId) -> std::result::Result<&Project, ProjectError> {
        self.get(id)
            .ok_or_else(|| ProjectError::UnknownProject(id.to_string()))
    }

    fn project_mut(&mut self, id: ProjectId) -> std::result::Result<&mut Project, ProjectError> {
        self.projects
            .get_mut(id.0)
            .ok_or_else(|| ProjectError::UnknownProject(id.to_string()))
    }

    /// Find a project by path
    pub fn find(&self, path: &ProjectPath) -> Option<ProjectId> {
        self.by_path.get(path).copied()
    }

    /// Immediate children, in declaration order
    pub fn children(&self, id: ProjectId) -> Vec<ProjectId> {
        self.get(id)
            .map(|p| p.children.values().copied().collect())
            .unwrap_or_default()
    }

    /// `id` followed by all of its descendants, depth-first in declaration order
    pub fn all_projects_in_tree(&self, id: ProjectId) -> Vec<ProjectId> {
        let mut result = Vec::new();
        if self.get(id).is_some() {
            self.collect_subtree(id, &mut result);
        }
        result
    }

    fn collect_subtree(&self, id: ProjectId, result: &mut Vec<ProjectId>) {
        result.push(id);
        for child in self.children(id) {
            self.collect_subtree(child, result);
        }
    }

    /// Run the project's configuration so its task set is final.
    /// Idempotent; a failure is reported again on every call.
    pub fn realize(&self, id: ProjectId) -> std::result::Result<(), ProjectError> {
        let project = self.project(id)?;
        let realized = project.tasks().realize()?;
        if realized {
            debug!(project = %project.path, "project realized");
        } else {
            trace!(project = %project.path, "project already realized");
        }
        Ok(())
    }

    /// Number of projects, including the root
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    fn path(s: &str) -> ProjectPath {
        ProjectPath::parse(s).unwrap()
    }

    #[test]
    fn test_new_tree_has_root() {
        let tree = ProjectTree::new("demo");
        assert_eq!(tree.len(), 1);
        let root = tree.project(tree.root()).unwrap();
        assert_eq!(root.name(), "demo");
        assert!(root.path().is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_add_project_creates_ancestors() {
        let mut tree = ProjectTree::new("root");
        let b = tree.add_project(&path(":a:b")).unwrap();

        let a = tree.find(&path(":a")).unwrap();
        assert_eq!(tree.project(b).unwrap().parent(), Some(a));
        assert_eq!(tree.children(ProjectId::ROOT), vec![a]);
        assert_eq!(tree.children(a), vec![b]);
        assert_eq!(tree.project(b).unwrap().name(), "b");
    }

    #[test]
    fn test_add_project_duplicate() {
        let mut tree = ProjectTree::new("root");
        tree.add_project(&path(":a")).unwrap();
        assert!(matches!(
            tree.add_project(&path(":a")),
            Err(ProjectError::DuplicateProject(_))
        ));
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let mut tree = ProjectTree::new("root");
        let z = tree.add_project(&path(":z")).unwrap();
        let a = tree.add_project(&path(":a")).unwrap();
        let m = tree.add_project(&path(":m")).unwrap();
        assert_eq!(tree.children(ProjectId::ROOT), vec![z, a, m]);
    }

    #[test]
    fn test_all_projects_in_tree_is_preorder() {
        let mut tree = ProjectTree::new("root");
        let a = tree.add_project(&path(":a")).unwrap();
        let c = tree.add_project(&path(":c")).unwrap();
        let ab = tree.add_project(&path(":a:b")).unwrap();

        assert_eq!(
            tree.all_projects_in_tree(ProjectId::ROOT),
            vec![ProjectId::ROOT, a, ab, c]
        );
        assert_eq!(tree.all_projects_in_tree(a), vec![a, ab]);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            name: "demo".to_string(),
            tasks: vec![TaskConfig::new("build")],
            projects: vec![ProjectConfig::new(":a:b")
                .with_task(TaskConfig::new("build"))
                .with_task(TaskConfig::new("check").deferred())],
            ..Default::default()
        };

        let tree = ProjectTree::from_config(&config).unwrap();
        assert_eq!(tree.len(), 3);

        let ab = tree.find(&path(":a:b")).unwrap();
        assert_eq!(tree.project(ab).unwrap().tasks().names(), vec!["build"]);

        tree.realize(ab).unwrap();
        assert_eq!(
            tree.project(ab).unwrap().tasks().names(),
            vec!["build", "check"]
        );
    }

    #[test]
    fn test_realize_reports_failure() {
        let config = Config {
            tasks: vec![TaskConfig::new("build"), TaskConfig::new("build").deferred()],
            ..Default::default()
        };
        let tree = ProjectTree::from_config(&config).unwrap();

        assert!(tree.realize(ProjectId::ROOT).is_err());
        assert!(tree.realize(ProjectId::ROOT).is_err());
    }

    #[test]
    fn test_unknown_project() {
        let tree = ProjectTree::new("root");
        let missing = ProjectId(7);
        assert!(tree.get(missing).is_none());
        assert!(tree.realize(missing).is_err());
        assert!(tree.all_projects_in_tree(missing).is_empty());
    }
}
