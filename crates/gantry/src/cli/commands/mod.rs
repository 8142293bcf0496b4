//! CLI commands

mod completions;
mod probe;
mod projects;
mod select;
mod tasks;

pub use completions::CompletionsCommand;
pub use probe::ProbeCommand;
pub use projects::ProjectsCommand;
pub use select::SelectCommand;
pub use tasks::TasksCommand;
