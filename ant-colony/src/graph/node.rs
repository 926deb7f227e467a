use std::{
    cmp::Ordering,
    collections::BTreeSet,
    hash::{Hash, Hasher},
    iter::FromIterator,
};

use serde::Serialize;

/// A node of a problem instance. Ids are assigned at load time and run from `1` to `n`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Node(usize);

impl Node {
    pub fn new(id: usize) -> Self {
        Node(id)
    }

    /// Creates the node stored at the zero-based position `index`.
    pub fn from_index(index: usize) -> Self {
        Node(index + 1)
    }

    pub fn id(&self) -> usize {
        self.0
    }

    /// Zero-based position of this node in the instance.
    pub fn index(&self) -> usize {
        assert!(self.0 >= 1, "node ids start at 1, got {}", self.0);
        self.0 - 1
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Node) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Node) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<usize> for Node {
    fn from(id: usize) -> Self {
        Node::new(id)
    }
}

/// A set of nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeSet(BTreeSet<Node>);

impl NodeSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, n: Node) -> bool {
        self.0.insert(n)
    }

    pub fn contains(&self, n: &Node) -> bool {
        self.0.contains(n)
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = Node;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl FromIterator<Node> for NodeSet {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        NodeSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod test_node {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        assert_eq!(Node::new(1).index(), 0);
        assert_eq!(Node::from_index(47), Node::new(48));
    }

    #[test]
    #[should_panic]
    fn test_index_of_zero_id() {
        Node::new(0).index();
    }

    #[test]
    fn test_node_set() {
        let set: NodeSet = vec![3, 1, 3, 2].into_iter().map(Node::new).collect();
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert!(set.contains(&2.into()));
        assert_eq!(
            set.into_iter().collect::<Vec<Node>>(),
            vec![1.into(), 2.into(), 3.into()]
        );
    }
}
