//! Documentation tree: single-selection browser over the project tree.

use crate::entities::file_node::{visible_rows, FileNode, TreeRow};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct DocumentationTree {
    roots: Vec<FileNode>,
    expanded: HashSet<String>,
    selected: Option<String>,
}

impl DocumentationTree {
    pub fn new(roots: Vec<FileNode>) -> Self {
        Self {
            roots,
            expanded: HashSet::new(),
            selected: None,
        }
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    pub fn toggle_expand(&mut self, path: &str) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    pub fn expand_all(&mut self) {
        fn collect(node: &FileNode, out: &mut HashSet<String>) {
            if node.is_folder() {
                out.insert(node.path.clone());
            }
            for child in node.children() {
                collect(child, out);
            }
        }
        for root in &self.roots {
            collect(root, &mut self.expanded);
        }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Select `path`, replacing any previous selection.
    ///
    /// Returns true when the selection changed, i.e. when the caller should
    /// fetch the documentation of the new path.
    pub fn select(&mut self, path: &str) -> bool {
        if self.selected.as_deref() == Some(path) {
            return false;
        }
        self.selected = Some(path.to_string());
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn find(&self, path: &str) -> Option<&FileNode> {
        fn walk<'a>(nodes: &'a [FileNode], path: &str) -> Option<&'a FileNode> {
            for node in nodes {
                if node.path == path {
                    return Some(node);
                }
                if let Some(found) = walk(node.children(), path) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, path)
    }

    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        visible_rows(&self.roots, |path| self.expanded.contains(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DocumentationTree {
        DocumentationTree::new(vec![FileNode::folder(
            "demo",
            "demo",
            vec![
                FileNode::file("main.py", "demo/main.py"),
                FileNode::folder("lib", "demo/lib", vec![FileNode::file("x.py", "demo/lib/x.py")]),
            ],
        )])
    }

    #[test]
    fn test_single_selection() {
        let mut tree = tree();
        assert!(tree.select("demo/main.py"));
        assert!(!tree.select("demo/main.py"));
        assert!(tree.select("demo/lib/x.py"));
        assert_eq!(tree.selected(), Some("demo/lib/x.py"));
    }

    #[test]
    fn test_expansion_independent_of_selection() {
        let mut tree = tree();
        tree.select("demo/lib");
        assert!(tree.toggle_expand("demo"));
        assert!(tree.toggle_expand("demo/lib"));
        assert_eq!(tree.selected(), Some("demo/lib"));
        assert_eq!(tree.rows().len(), 4);
        assert!(!tree.toggle_expand("demo"));
        assert_eq!(tree.rows().len(), 1);
    }

    #[test]
    fn test_find_nested() {
        let tree = tree();
        assert_eq!(
            tree.find("demo/lib/x.py").map(|n| n.name.as_str()),
            Some("x.py")
        );
        assert!(tree.find("missing").is_none());
    }
}
