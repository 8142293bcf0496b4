//! Gantry Core - Build description and project model
//!
//! This crate provides the error types, build description loading, and
//! the project tree with its per-project task containers and realization
//! step. Task name resolution lives in `gantry-tasks`.

pub mod config;
pub mod error;
pub mod project;

pub use config::{load_config, load_config_or_default, Config, ProjectConfig, TaskConfig};
pub use error::{ConfigError, GantryError, ProjectError, Result};
pub use project::{Project, ProjectId, ProjectPath, ProjectTree, RealizationState, Task, TaskContainer};
