use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Characters that would turn a folder name into a path or break a terminal.
const FORBIDDEN: [char; 6] = ['\t', '\n', '\r', '/', '\\', ':'];

/// A bare folder name for a new project.
///
/// Invariant: non-empty, no path separators, no `.`/`..`, no control
/// characters. Checked once here so nothing downstream touches the
/// filesystem with an unchecked name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref();
        let invalid = |reason: &str| DomainError::InvalidName {
            name: name.escape_debug().to_string(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if let Some(ch) = name.chars().find(|c| FORBIDDEN.contains(c)) {
            return Err(invalid(&format!(
                "name cannot contain '{}'",
                ch.escape_debug()
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name cannot contain control characters"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name cannot be a relative directory reference"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}
