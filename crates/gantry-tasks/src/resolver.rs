//! Task name resolution across a project tree

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument};

use gantry_core::{ProjectId, Result};

use crate::model::ProjectModel;
use crate::selection::{collect_from_subtree, TaskSelectionResult};

/// Resolves task names to tasks, realizing only the projects it must
pub struct TaskNameResolver<'m, M: ?Sized> {
    model: &'m M,
}

impl<'m, M: ProjectModel + ?Sized> TaskNameResolver<'m, M> {
    /// Create a resolver over a project model
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// The model this resolver reads from
    pub fn model(&self) -> &'m M {
        self.model
    }

    /// Non-exhaustively check whether some project under `project` already
    /// has a task called `name`, without realizing anything.
    ///
    /// `true` is certain. `false` only means no eagerly registered task
    /// matched: deferred configuration may still create one, so callers must
    /// fall back to an authoritative lookup.
    pub fn try_find_unqualified_task_cheaply(&self, name: &str, project: ProjectId) -> bool {
        self.model
            .all_projects_in_tree(project)
            .into_iter()
            .any(|p| self.model.registered_names(p).iter().any(|n| n == name))
    }

    /// Find the tasks called exactly `name`. Returns `None` when nothing
    /// matches.
    ///
    /// Without subprojects only `project` is realized and searched. With
    /// subprojects the tree is searched depth-first, skipping the
    /// descendants of any match that implies subprojects.
    #[instrument(
        skip_all,
        fields(task = name, project = %project, include_subprojects = include_subprojects)
    )]
    pub fn select_with_name(
        &self,
        name: &str,
        project: ProjectId,
        include_subprojects: bool,
    ) -> Result<Option<TaskSelectionResult<'m, M>>> {
        if !include_subprojects {
            self.model.realize(project)?;
            let found = self.model.find_task(project, name);
            debug!(found = found.is_some(), "single-project lookup");
            return Ok(found.map(|task| TaskSelectionResult::fixed([task])));
        }

        let mut tasks = IndexSet::new();
        collect_from_subtree(self.model, name, project, &mut tasks)?;
        debug!(matches = tasks.len(), "subtree lookup");

        if tasks.is_empty() {
            Ok(None)
        } else {
            Ok(Some(TaskSelectionResult::fixed(tasks)))
        }
    }

    /// Map every task name visible from `project` to a deferred selection.
    ///
    /// Names are gathered now; the tasks behind each name are only
    /// collected when the caller asks for that entry. Order is first
    /// discovery: a project's own names, then its children in
    /// declaration order. Returns an empty map when there are no tasks.
    #[instrument(skip_all, fields(project = %project, include_subprojects = include_subprojects))]
    pub fn select_all(
        &self,
        project: ProjectId,
        include_subprojects: bool,
    ) -> Result<IndexMap<String, TaskSelectionResult<'m, M>>> {
        let mut selected = IndexMap::new();

        if !include_subprojects {
            self.model.realize(project)?;
            for name in self.model.all_names(project) {
                let result = TaskSelectionResult::SingleProject {
                    name: name.clone(),
                    project,
                    model: self.model,
                };
                selected.insert(name, result);
            }
        } else {
            let mut names = IndexSet::new();
            self.collect_task_names(project, &mut names)?;
            for name in names {
                let result = TaskSelectionResult::MultiProject {
                    name: name.clone(),
                    project,
                    model: self.model,
                };
                selected.insert(name, result);
            }
        }

        debug!(names = selected.len(), "selected all task names");
        Ok(selected)
    }

    fn collect_task_names(&self, project: ProjectId, names: &mut IndexSet<String>) -> Result<()> {
        self.model.realize(project)?;
        names.extend(self.model.all_names(project));
        for child in self.model.child_projects(project) {
            self.collect_task_names(child, names)?;
        }
        Ok(())
    }
}

impl<M: ?Sized> Clone for TaskNameResolver<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for TaskNameResolver<'_, M> {}
