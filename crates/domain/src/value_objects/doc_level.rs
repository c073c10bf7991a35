//! DocLevel - granularity of a generated document

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Documentation level: one file, one folder, or the whole project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocLevel {
    #[default]
    File,
    Folder,
    Project,
}

impl DocLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocLevel::File => "file",
            DocLevel::Folder => "folder",
            DocLevel::Project => "project",
        }
    }

    /// Best-effort level guess used when the server does not report one.
    pub fn infer_from_path(path: &str) -> Self {
        if path.ends_with('/') || path.contains("folder_doc") || path.contains("project_doc") {
            DocLevel::Folder
        } else {
            DocLevel::File
        }
    }

    /// Level of a path in the evaluation view: `_project` marks the
    /// project document, a file extension in the last segment marks a file.
    pub fn classify_path(path: &str) -> Self {
        if path.is_empty() {
            return DocLevel::File;
        }
        if path.contains("_project") {
            return DocLevel::Project;
        }
        let last = path.rsplit(['/', '\\']).next().unwrap_or(path);
        match last.rfind('.') {
            Some(idx) if idx + 1 < last.len() => DocLevel::File,
            _ => DocLevel::Folder,
        }
    }

    /// Folder and project documents are split into editable sections
    pub fn has_sections(&self) -> bool {
        !matches!(self, DocLevel::File)
    }
}

impl fmt::Display for DocLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(DocLevel::File),
            "folder" => Ok(DocLevel::Folder),
            "project" => Ok(DocLevel::Project),
            other => Err(DomainError::InvalidValue {
                kind: "documentation level",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_path() {
        assert_eq!(DocLevel::infer_from_path("src/"), DocLevel::Folder);
        assert_eq!(
            DocLevel::infer_from_path("out/project_doc.md"),
            DocLevel::Folder
        );
        assert_eq!(DocLevel::infer_from_path("src/main.py"), DocLevel::File);
    }

    #[test]
    fn test_classify_path() {
        assert_eq!(DocLevel::classify_path("demo/src/main.py"), DocLevel::File);
        assert_eq!(DocLevel::classify_path("demo/src"), DocLevel::Folder);
        assert_eq!(DocLevel::classify_path("demo_project"), DocLevel::Project);
        assert_eq!(DocLevel::classify_path("v1.2/src"), DocLevel::Folder);
        assert_eq!(DocLevel::classify_path(""), DocLevel::File);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("Project".parse::<DocLevel>(), Ok(DocLevel::Project));
        assert!("module".parse::<DocLevel>().is_err());
    }
}
