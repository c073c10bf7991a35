use std::collections::HashSet;

/// Set of paths that remembers insertion order.
///
/// Re-inserting a removed path places it at the end again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PathSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the path was not present
    pub fn insert(&mut self, path: &str) -> bool {
        if self.members.contains(path) {
            return false;
        }
        self.members.insert(path.to_string());
        self.order.push(path.to_string());
        true
    }

    /// Returns true if the path was present
    pub fn remove(&mut self, path: &str) -> bool {
        if !self.members.remove(path) {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|p| p == path) {
            self.order.remove(pos);
        }
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.members.contains(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_kept() {
        let mut set = PathSet::new();
        assert!(set.insert("b"));
        assert!(set.insert("a"));
        assert!(!set.insert("b"));
        assert_eq!(set.to_vec(), vec!["b", "a"]);

        assert!(set.remove("b"));
        assert!(!set.remove("b"));
        set.insert("b");
        assert_eq!(set.to_vec(), vec!["a", "b"]);
        assert_eq!(set.len(), 2);
    }
}
