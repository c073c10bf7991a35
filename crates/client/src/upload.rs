//! Local project collection for `POST /upload`

use common::{InsightError, InsightResult};
use domain::DomainError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// One file of the upload, named relative to the project's parent directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// `<project dir>/<path inside it>`, always `/`-separated
    pub relative_path: String,
    pub bytes: Vec<u8>,
}

/// Collect every regular file below `dir`.
///
/// Symlinks are not followed. Files come back sorted by path so repeated
/// uploads of the same tree produce the same request.
pub async fn collect_project_files(dir: &Path) -> InsightResult<Vec<UploadFile>> {
    if !dir.is_dir() {
        return Err(DomainError::InvalidUpload(format!(
            "not a directory: {}",
            dir.display()
        ))
        .into());
    }
    let dir_name = project_dir_name(dir)?;

    let mut paths: Vec<(PathBuf, String)> = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|e| InsightError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let inner = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| InsightError::Configuration(e.to_string()))?;
        let segments: Vec<String> = inner
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        paths.push((
            entry.path().to_path_buf(),
            format!("{}/{}", dir_name, segments.join("/")),
        ));
    }

    if paths.is_empty() {
        return Err(DomainError::InvalidUpload(format!(
            "directory contains no files: {}",
            dir.display()
        ))
        .into());
    }

    let mut files = Vec::with_capacity(paths.len());
    for (path, relative_path) in paths {
        let bytes = tokio::fs::read(&path).await?;
        debug!(file = %relative_path, size = bytes.len(), "Collected upload file");
        files.push(UploadFile {
            relative_path,
            bytes,
        });
    }
    info!(dir = %dir.display(), files = files.len(), "Project collected for upload");
    Ok(files)
}

/// Last component of `dir`, used as the default project name
pub fn project_dir_name(dir: &Path) -> InsightResult<String> {
    let resolved = if dir.file_name().is_some() {
        dir.to_path_buf()
    } else {
        dir.canonicalize()?
    };
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            DomainError::InvalidUpload(format!("cannot name project from {}", dir.display()))
                .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collects_nested_files_with_relative_names() {
        let temp = TempDir::new().expect("temp dir");
        let project = temp.path().join("demo");
        std::fs::create_dir_all(project.join("src/util")).expect("dirs");
        std::fs::write(project.join("README.md"), "# demo").expect("write");
        std::fs::write(project.join("src/main.py"), "print()").expect("write");
        std::fs::write(project.join("src/util/io.py"), "").expect("write");

        let files = collect_project_files(&project).await.expect("collected");
        let names: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            names,
            vec!["demo/README.md", "demo/src/main.py", "demo/src/util/io.py"]
        );
        assert_eq!(files[0].bytes, b"# demo");
    }

    #[tokio::test]
    async fn test_empty_directory_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let project = temp.path().join("empty");
        std::fs::create_dir_all(project.join("nested")).expect("dirs");

        let err = collect_project_files(&project).await.expect_err("no files");
        assert!(matches!(
            err,
            InsightError::Domain(DomainError::InvalidUpload(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_directory_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let err = collect_project_files(&temp.path().join("nope"))
            .await
            .expect_err("missing dir");
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_project_dir_name() {
        assert_eq!(
            project_dir_name(Path::new("/work/demo")).expect("named"),
            "demo"
        );
    }
}
