//! Project tree and per-project task containers
//!
//! The tree is what the build description evaluates to:
//! - Projects addressed by `ProjectId`, with children in declaration order
//! - One `TaskContainer` per project, guarded by its own mutex
//! - Realization, which runs deferred task declarations exactly once

pub mod container;
pub mod path;
pub mod task;
pub mod tree;

pub use container::{RealizationState, TaskContainer};
pub use path::{validate_task_name, ProjectPath};
pub use task::Task;
pub use tree::{Project, ProjectId, ProjectTree};
