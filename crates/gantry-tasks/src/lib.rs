//! Gantry Tasks - Task name resolution
//!
//! This crate answers which task objects a name refers to in a
//! multi-project build: a cheap existence probe, exact-name selection
//! over one project or a whole subtree, and lazy per-name selection of
//! every task name in a tree. It does not configure, order, or execute
//! tasks.

pub mod model;
pub mod resolver;
pub mod selection;
pub mod selector;
pub mod task;

#[cfg(test)]
mod testing;

pub use model::ProjectModel;
pub use resolver::TaskNameResolver;
pub use selection::TaskSelectionResult;
pub use selector::{SelectionError, TaskSelection, TaskSelector};
pub use task::TaskPath;
