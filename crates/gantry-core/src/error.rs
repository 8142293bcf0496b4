//! Error types for Gantry

use thiserror::Error;

/// Result type alias using GantryError
pub type Result<T> = std::result::Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Debug, Error)]
pub enum GantryError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Project tree and realization errors
    #[error(transparent)]
    Project(#[from] ProjectError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading build description: {0}")]
    Io(#[from] std::io::Error),
}

/// Project tree and realization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Malformed project path
    #[error("Invalid project path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Project declared twice
    #[error("Project '{0}' is already declared")]
    DuplicateProject(String),

    /// Project id or path not part of the tree
    #[error("Project '{0}' not found")]
    UnknownProject(String),

    /// Malformed task name
    #[error("Invalid task name '{name}': {reason}")]
    InvalidTaskName { name: String, reason: String },

    /// Two tasks with the same name in one container
    #[error("Task '{task}' is already registered in project '{project}'")]
    DuplicateTask { project: String, task: String },

    /// Configuring the project failed
    #[error("Failed to realize project '{project}': {reason}")]
    RealizationFailed { project: String, reason: String },
}

impl GantryError {
    /// Whether this error came from loading or validating the build description
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
