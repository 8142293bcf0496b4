//! Task selection results
//!
//! A selection result is a reusable handle that yields the tasks a name
//! refers to. `Fixed` results were resolved up front; the project-bound
//! variants resolve against the model every time they are collected, so
//! tasks added by realization in between are picked up.

use std::fmt;
use std::iter;
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::trace;

use gantry_core::{ProjectId, Result, Task};

use crate::model::ProjectModel;

/// Tasks selected for one name
pub enum TaskSelectionResult<'m, M: ?Sized> {
    /// Tasks that are already known
    Fixed(Arc<[Arc<Task>]>),

    /// The task called `name` in one project's container
    SingleProject {
        name: String,
        project: ProjectId,
        model: &'m M,
    },

    /// Every task called `name` under `project`, honouring
    /// `implies_subprojects`
    MultiProject {
        name: String,
        project: ProjectId,
        model: &'m M,
    },
}

impl<'m, M: ProjectModel + ?Sized> TaskSelectionResult<'m, M> {
    /// Wrap tasks that are already known
    pub fn fixed(tasks: impl IntoIterator<Item = Arc<Task>>) -> Self {
        Self::Fixed(tasks.into_iter().collect())
    }

    /// Append the selected tasks to `destination`, in selection order.
    ///
    /// Project-bound variants realize the projects they visit; realization
    /// failures are returned as-is.
    pub fn collect_tasks<E>(&self, destination: &mut E) -> Result<()>
    where
        E: Extend<Arc<Task>>,
    {
        match self {
            Self::Fixed(tasks) => {
                destination.extend(tasks.iter().cloned());
                Ok(())
            }
            Self::SingleProject {
                name,
                project,
                model,
            } => {
                model.realize(*project)?;
                destination.extend(model.find_task(*project, name));
                Ok(())
            }
            Self::MultiProject {
                name,
                project,
                model,
            } => collect_from_subtree(*model, name, *project, destination),
        }
    }

    /// Collect into a fresh, duplicate-free list
    pub fn tasks(&self) -> Result<Vec<Arc<Task>>> {
        let mut tasks = IndexSet::new();
        self.collect_tasks(&mut tasks)?;
        Ok(tasks.into_iter().collect())
    }

    /// Whether collecting consults the model
    pub fn is_deferred(&self) -> bool {
        !matches!(self, Self::Fixed(_))
    }
}

/// Depth-first search for `name` starting at `project`.
///
/// Each visited project is realized first. A match whose task implies
/// subprojects stops the descent below that project.
pub(crate) fn collect_from_subtree<M, E>(
    model: &M,
    name: &str,
    project: ProjectId,
    destination: &mut E,
) -> Result<()>
where
    M: ProjectModel + ?Sized,
    E: Extend<Arc<Task>>,
{
    model.realize(project)?;

    if let Some(task) = model.find_task(project, name) {
        let implies_subprojects = task.implies_subprojects;
        destination.extend(iter::once(task));
        if implies_subprojects {
            trace!(task = name, %project, "match implies subprojects, pruning");
            return Ok(());
        }
    }

    for child in model.child_projects(project) {
        collect_from_subtree(model, name, child, destination)?;
    }
    Ok(())
}

impl<M: ?Sized> Clone for TaskSelectionResult<'_, M> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(tasks) => Self::Fixed(Arc::clone(tasks)),
            Self::SingleProject {
                name,
                project,
                model,
            } => Self::SingleProject {
                name: name.clone(),
                project: *project,
                model: *model,
            },
            Self::MultiProject {
                name,
                project,
                model,
            } => Self::MultiProject {
                name: name.clone(),
                project: *project,
                model: *model,
            },
        }
    }
}

impl<M: ?Sized> fmt::Debug for TaskSelectionResult<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(tasks) => f
                .debug_tuple("Fixed")
                .field(&tasks.iter().map(|t| t.path()).collect::<Vec<_>>())
                .finish(),
            Self::SingleProject { name, project, .. } => f
                .debug_struct("SingleProject")
                .field("name", name)
                .field("project", project)
                .finish(),
            Self::MultiProject { name, project, .. } => f
                .debug_struct("MultiProject")
                .field("name", name)
                .field("project", project)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{paths, FakeModel};

    #[test]
    fn test_fixed_never_touches_model() {
        let mut model = FakeModel::new();
        model.task(FakeModel::ROOT, "build", false);
        let task = model.find_task(FakeModel::ROOT, "build").unwrap();

        let result: TaskSelectionResult<'_, FakeModel> = TaskSelectionResult::fixed([task]);
        let mut out = Vec::new();
        result.collect_tasks(&mut out).unwrap();
        result.collect_tasks(&mut out).unwrap();

        assert_eq!(paths(&out), vec![":build", ":build"]);
        assert_eq!(model.total_realize_calls(), 0);
        assert!(!result.is_deferred());
    }

    #[test]
    fn test_single_project_realizes_and_finds() {
        let mut model = FakeModel::new();
        model.deferred_task(FakeModel::ROOT, "check", false);

        let result = TaskSelectionResult::SingleProject {
            name: "check".to_string(),
            project: FakeModel::ROOT,
            model: &model,
        };

        assert_eq!(paths(&result.tasks().unwrap()), vec![":check"]);
        assert!(model.is_realized(FakeModel::ROOT));
        assert!(result.is_deferred());
    }

    #[test]
    fn test_single_project_missing_name_yields_nothing() {
        let model = FakeModel::new();
        let result = TaskSelectionResult::SingleProject {
            name: "nope".to_string(),
            project: FakeModel::ROOT,
            model: &model,
        };
        assert!(result.tasks().unwrap().is_empty());
    }

    #[test]
    fn test_single_project_collect_is_repeatable() {
        let mut model = FakeModel::new();
        let a = model.add_project(FakeModel::ROOT, "a");
        model.task(a, "build", false);
        model.deferred_task(a, "gen", false);

        let result = TaskSelectionResult::SingleProject {
            name: "gen".to_string(),
            project: a,
            model: &model,
        };

        let mut collected = Vec::new();
        result.collect_tasks(&mut collected).unwrap();
        result.collect_tasks(&mut collected).unwrap();

        assert_eq!(paths(&collected), vec![":a:gen", ":a:gen"]);
        assert!(Arc::ptr_eq(&collected[0], &collected[1]));
        assert_eq!(model.realize_calls(a), 2);
        assert_eq!(model.registered_names(a), vec!["build", "gen"]);
    }

    #[test]
    fn test_multi_project_reresolves_each_collect() {
        let mut model = FakeModel::new();
        let a = model.add_project(FakeModel::ROOT, "a");
        model.task(FakeModel::ROOT, "build", false);

        let result = TaskSelectionResult::MultiProject {
            name: "build".to_string(),
            project: FakeModel::ROOT,
            model: &model,
        };
        assert_eq!(paths(&result.tasks().unwrap()), vec![":build"]);

        model.register_late(a, "build");
        assert_eq!(paths(&result.tasks().unwrap()), vec![":build", ":a:build"]);
    }

    #[test]
    fn test_multi_project_collect_is_repeatable() {
        let mut model = FakeModel::new();
        let a = model.add_project(FakeModel::ROOT, "a");
        let b = model.add_project(FakeModel::ROOT, "b");
        model.task(a, "test", false);
        model.deferred_task(b, "test", false);

        let result = TaskSelectionResult::MultiProject {
            name: "test".to_string(),
            project: FakeModel::ROOT,
            model: &model,
        };
        let first = result.tasks().unwrap();
        let second = result.tasks().unwrap();
        assert_eq!(paths(&first), vec![":a:test", ":b:test"]);
        assert_eq!(paths(&first), paths(&second));
    }

    #[test]
    fn test_collect_propagates_realization_failure() {
        let mut model = FakeModel::new();
        let a = model.add_project(FakeModel::ROOT, "a");
        model.fail(a, "broken build script");

        let result = TaskSelectionResult::MultiProject {
            name: "build".to_string(),
            project: FakeModel::ROOT,
            model: &model,
        };
        let err = result.tasks().unwrap_err();
        assert!(err.to_string().contains("broken build script"));
    }

    #[test]
    fn test_clone_shares_fixed_tasks() {
        let mut model = FakeModel::new();
        model.task(FakeModel::ROOT, "build", false);
        let task = model.find_task(FakeModel::ROOT, "build").unwrap();

        let result: TaskSelectionResult<'_, FakeModel> = TaskSelectionResult::fixed([task]);
        let copy = result.clone();
        assert_eq!(paths(&copy.tasks().unwrap()), vec![":build"]);
        assert!(format!("{:?}", copy).contains(":build"));
    }
}
