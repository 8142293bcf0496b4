//! Project paths (":", ":a", ":a:b")

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ProjectError;

/// Absolute path of a project within the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl ProjectPath {
    /// Separator between path segments
    pub const SEPARATOR: char = ':';

    /// Path of the root project
    pub fn root() -> Self {
        Self(Self::SEPARATOR.to_string())
    }

    /// Parse an absolute project path
    pub fn parse(s: &str) -> Result<Self, ProjectError> {
        let invalid = |reason: &str| ProjectError::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        let Some(rest) = s.strip_prefix(Self::SEPARATOR) else {
            return Err(invalid("must start with ':'"));
        };

        if rest.is_empty() {
            return Ok(Self::root());
        }

        for segment in rest.split(Self::SEPARATOR) {
            if segment.is_empty() {
                return Err(invalid("contains an empty segment"));
            }
            if segment.chars().any(char::is_whitespace) {
                return Err(invalid("segments cannot contain whitespace"));
            }
        }

        Ok(Self(s.to_string()))
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Path of a direct child
    pub fn child(&self, name: &str) -> Self {
        if self.is_root() {
            Self(format!("{}{}", Self::SEPARATOR, name))
        } else {
            Self(format!("{}{}{}", self.0, Self::SEPARATOR, name))
        }
    }

    /// Path of the parent project, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(Self::SEPARATOR) {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
        }
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Path segments from the root down
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[1..].split(Self::SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Number of segments (0 for the root)
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Fully qualified path of a task in this project
    pub fn task_path(&self, task_name: &str) -> String {
        if self.is_root() {
            format!("{}{}", Self::SEPARATOR, task_name)
        } else {
            format!("{}{}{}", self.0, Self::SEPARATOR, task_name)
        }
    }

    /// The path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectPath {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check that a name can be used as a task name
pub fn validate_task_name(name: &str) -> Result<(), ProjectError> {
    let invalid = |reason: &str| ProjectError::InvalidTaskName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty"));
    }
    if name.contains(ProjectPath::SEPARATOR) {
        return Err(invalid("cannot contain ':'"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("cannot contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let root = ProjectPath::parse(":").unwrap();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.name(), None);
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_parse_nested() {
        let path = ProjectPath::parse(":a:b").unwrap();
        assert_eq!(path.depth(), 2);
        assert_eq!(path.name(), Some("b"));
        assert_eq!(path.parent().unwrap().as_str(), ":a");
        assert_eq!(path.parent().unwrap().parent().unwrap(), ProjectPath::root());
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(ProjectPath::parse("").is_err());
        assert!(ProjectPath::parse("a").is_err());
        assert!(ProjectPath::parse(":a:").is_err());
        assert!(ProjectPath::parse(":a::b").is_err());
        assert!(ProjectPath::parse(": a").is_err());
    }

    #[test]
    fn test_child() {
        let root = ProjectPath::root();
        let a = root.child("a");
        assert_eq!(a.as_str(), ":a");
        assert_eq!(a.child("b").as_str(), ":a:b");
    }

    #[test]
    fn test_task_path() {
        assert_eq!(ProjectPath::root().task_path("build"), ":build");
        assert_eq!(
            ProjectPath::parse(":a:b").unwrap().task_path("build"),
            ":a:b:build"
        );
    }

    #[test]
    fn test_validate_task_name() {
        assert!(validate_task_name("build").is_ok());
        assert!(validate_task_name("compileJava").is_ok());
        assert!(validate_task_name("").is_err());
        assert!(validate_task_name("a:build").is_err());
        assert!(validate_task_name("bu ild").is_err());
    }
}
