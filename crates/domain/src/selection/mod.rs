//! File-selection tree used while setting up a generation job.
//!
//! The picker keeps two independent sets over the fetched tree:
//!
//! - the **selection**, closed under both directions of the hierarchy: a
//!   selected folder has its whole subtree selected and a selected node has
//!   every ancestor selected;
//! - the **expansion**, which only affects what is drawn.
//!
//! Parent links live in a path-keyed index built once from the payload, so
//! the tree itself is never mutated.

mod path_set;

use path_set::PathSet;

use crate::entities::file_node::{visible_rows, FileNode, NodeKind, TreeRow};
use crate::errors::{DomainError, DomainResult};
use std::collections::{HashMap, HashSet};

/// Callback receiving the selection after every change
pub type SelectionListener = Box<dyn FnMut(&[String]) + Send>;

#[derive(Debug, Clone)]
struct IndexEntry {
    kind: NodeKind,
    parent: Option<String>,
    children: Vec<String>,
}

pub struct FileSelectionTree {
    roots: Vec<FileNode>,
    index: HashMap<String, IndexEntry>,
    selected: PathSet,
    expanded: HashSet<String>,
    listener: Option<SelectionListener>,
}

impl std::fmt::Debug for FileSelectionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSelectionTree")
            .field("nodes", &self.index.len())
            .field("selected", &self.selected)
            .field("expanded", &self.expanded)
            .finish()
    }
}

impl FileSelectionTree {
    /// Build the tree and its path index. Both sets start empty.
    ///
    /// If a path occurs more than once, the first occurrence in pre-order is
    /// indexed and later duplicates (with their subtrees) are ignored.
    pub fn new(roots: Vec<FileNode>) -> Self {
        let mut index = HashMap::new();
        for root in &roots {
            Self::index_node(&mut index, root, None);
        }
        Self {
            roots,
            index,
            selected: PathSet::new(),
            expanded: HashSet::new(),
            listener: None,
        }
    }

    /// Register the selection-change callback
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&[String]) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    fn index_node(
        index: &mut HashMap<String, IndexEntry>,
        node: &FileNode,
        parent: Option<&str>,
    ) -> bool {
        if index.contains_key(&node.path) {
            return false;
        }
        index.insert(
            node.path.clone(),
            IndexEntry {
                kind: node.kind,
                parent: parent.map(str::to_string),
                children: Vec::new(),
            },
        );
        let mut children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            if Self::index_node(index, child, Some(&node.path)) {
                children.push(child.path.clone());
            }
        }
        if let Some(entry) = index.get_mut(&node.path) {
            entry.children = children;
        }
        true
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn kind(&self, path: &str) -> Option<NodeKind> {
        self.index.get(path).map(|entry| entry.kind)
    }

    pub fn parent(&self, path: &str) -> Option<&str> {
        self.index.get(path).and_then(|entry| entry.parent.as_deref())
    }

    /// `path` followed by its whole subtree, in pre-order
    pub fn descendants(&self, path: &str) -> DomainResult<Vec<String>> {
        if !self.index.contains_key(path) {
            return Err(DomainError::NodeNotFound(path.to_string()));
        }
        let mut out = Vec::new();
        let mut stack = vec![path];
        while let Some(current) = stack.pop() {
            out.push(current.to_string());
            if let Some(entry) = self.index.get(current) {
                stack.extend(entry.children.iter().rev().map(String::as_str));
            }
        }
        Ok(out)
    }

    /// Ancestors of `path`, nearest first
    pub fn ancestors(&self, path: &str) -> DomainResult<Vec<String>> {
        let entry = self
            .index
            .get(path)
            .ok_or_else(|| DomainError::NodeNotFound(path.to_string()))?;
        let mut out = Vec::new();
        let mut current = entry.parent.as_deref();
        while let Some(parent) = current {
            out.push(parent.to_string());
            current = self.index.get(parent).and_then(|e| e.parent.as_deref());
        }
        Ok(out)
    }

    /// Flip the expansion of `path`. Returns the new state.
    pub fn toggle_expand(&mut self, path: &str) -> bool {
        if self.expanded.remove(path) {
            false
        } else {
            self.expanded.insert(path.to_string());
            true
        }
    }

    pub fn expand_all(&mut self) {
        let folders = self
            .index
            .iter()
            .filter(|(_, entry)| entry.kind == NodeKind::Folder)
            .map(|(path, _)| path.clone());
        self.expanded.extend(folders);
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Select or deselect `path`, keeping the selection closed over the
    /// hierarchy, then notify the listener.
    ///
    /// Deselecting removes the node and its subtree only; ancestors stay.
    pub fn toggle_selection(&mut self, path: &str) -> DomainResult<Vec<String>> {
        let subtree = self.descendants(path)?;

        if self.selected.contains(path) {
            for p in &subtree {
                self.selected.remove(p);
            }
        } else {
            let ancestors = self.ancestors(path)?;
            for p in subtree.iter().chain(ancestors.iter()) {
                self.selected.insert(p);
            }
        }

        let snapshot = self.selected.to_vec();
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
        Ok(snapshot)
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    /// Selected paths in insertion order
    pub fn selection(&self) -> Vec<String> {
        self.selected.to_vec()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Rows to draw given the current expansion
    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        visible_rows(&self.roots, |path| self.expanded.contains(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn scenario_tree() -> FileSelectionTree {
        FileSelectionTree::new(vec![FileNode::folder(
            "root",
            "root",
            vec![
                FileNode::file("a.txt", "a.txt"),
                FileNode::folder(
                    "b",
                    "b",
                    vec![
                        FileNode::file("c.txt", "b/c.txt"),
                        FileNode::file("d.txt", "b/d.txt"),
                    ],
                ),
            ],
        )])
    }

    #[test]
    fn test_descendants_pre_order() {
        let tree = scenario_tree();
        assert_eq!(
            tree.descendants("root").expect("known path"),
            vec!["root", "a.txt", "b", "b/c.txt", "b/d.txt"]
        );
        assert_eq!(tree.descendants("a.txt").expect("known path"), vec!["a.txt"]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = scenario_tree();
        assert_eq!(
            tree.ancestors("b/c.txt").expect("known path"),
            vec!["b", "root"]
        );
        assert!(tree.ancestors("root").expect("known path").is_empty());
    }

    #[test]
    fn test_selection_emits_insertion_order() {
        let mut tree = scenario_tree();
        let emitted = tree.toggle_selection("b").expect("known path");
        assert_eq!(emitted, vec!["b", "b/c.txt", "b/d.txt", "root"]);
    }

    #[test]
    fn test_listener_receives_every_change() {
        let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut tree = scenario_tree().with_listener(move |paths| {
            sink.lock().expect("lock").push(paths.to_vec());
        });

        tree.toggle_selection("a.txt").expect("known path");
        tree.toggle_selection("a.txt").expect("known path");

        let seen = seen.lock().expect("lock");
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], vec!["a.txt", "root"]);
        assert_eq!(seen[1], vec!["root"]);
    }

    #[test]
    fn test_unknown_path_rejected() {
        let mut tree = scenario_tree();
        assert_eq!(
            tree.toggle_selection("nope"),
            Err(DomainError::NodeNotFound("nope".to_string()))
        );
        assert_eq!(tree.selected_count(), 0);
    }

    #[test]
    fn test_toggle_expand_unknown_path_allowed() {
        let mut tree = scenario_tree();
        assert!(tree.toggle_expand("ghost"));
        assert!(tree.is_expanded("ghost"));
        assert!(!tree.toggle_expand("ghost"));
    }

    #[test]
    fn test_duplicate_paths_first_wins() {
        let tree = FileSelectionTree::new(vec![
            FileNode::folder("x", "x", vec![FileNode::file("one", "x/one")]),
            FileNode::folder("x", "x", vec![FileNode::file("two", "x/two")]),
        ]);
        assert_eq!(tree.descendants("x").expect("known path"), vec!["x", "x/one"]);
        assert!(!tree.contains("x/two"));
    }

    #[test]
    fn test_rows_follow_expansion() {
        let mut tree = scenario_tree();
        assert_eq!(tree.rows().len(), 1);
        tree.expand_all();
        assert_eq!(tree.rows().len(), 5);
    }
}
