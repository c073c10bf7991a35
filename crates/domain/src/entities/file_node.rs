//! FileNode - one entry of the server-supplied project tree

use serde::{Deserialize, Serialize};

/// File or folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// Node of the `GET /file-structure/{project}` payload.
///
/// `path` identifies the node within its tree. Parent links are not stored
/// here; trees that need them build a path index on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    pub fn file(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::File,
            children: None,
        }
    }

    pub fn folder(name: &str, path: &str, children: Vec<FileNode>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::Folder,
            children: Some(children),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn children(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// A row of a flattened tree, as drawn by the tree views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub node: &'a FileNode,
    pub depth: usize,
    pub expanded: bool,
}

/// Flatten `roots` in pre-order, descending only into expanded folders.
pub fn visible_rows<'a, F>(roots: &'a [FileNode], is_expanded: F) -> Vec<TreeRow<'a>>
where
    F: Fn(&str) -> bool,
{
    fn walk<'a, F: Fn(&str) -> bool>(
        node: &'a FileNode,
        depth: usize,
        is_expanded: &F,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        let expanded = node.is_folder() && is_expanded(&node.path);
        rows.push(TreeRow {
            node,
            depth,
            expanded,
        });
        if expanded {
            for child in node.children() {
                walk(child, depth + 1, is_expanded, rows);
            }
        }
    }

    let mut rows = Vec::new();
    for root in roots {
        walk(root, 0, &is_expanded, &mut rows);
    }
    rows
}

/// Strip any directory prefix from a project name (`uploads/demo` → `demo`).
pub fn clean_project_name(project_name: &str) -> &str {
    project_name
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(project_name)
}
