//! Exit codes for the CLI

use gantry_core::{GantryError, ProjectError};
use gantry_tasks::SelectionError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Build description could not be loaded or is invalid
pub const CONFIG_ERROR: i32 = 2;

/// Requested task or project does not exist
pub const NOT_FOUND: i32 = 3;

/// A project failed to realize
pub const REALIZATION_ERROR: i32 = 4;

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<SelectionError>() {
        return match err {
            SelectionError::ProjectNotFound(_) | SelectionError::TaskNotFound { .. } => NOT_FOUND,
            SelectionError::InvalidPath { .. } => ERROR,
            SelectionError::Configuration(inner) => for_gantry_error(inner),
        };
    }
    if let Some(err) = err.downcast_ref::<GantryError>() {
        return for_gantry_error(err);
    }
    if let Some(err) = err.downcast_ref::<ProjectError>() {
        return for_project_error(err);
    }
    ERROR
}

fn for_gantry_error(err: &GantryError) -> i32 {
    match err {
        GantryError::Project(inner) => for_project_error(inner),
        GantryError::Config(_) => CONFIG_ERROR,
    }
}

fn for_project_error(err: &ProjectError) -> i32 {
    match err {
        ProjectError::RealizationFailed { .. } => REALIZATION_ERROR,
        ProjectError::UnknownProject(_) => NOT_FOUND,
        _ => CONFIG_ERROR,
    }
}
