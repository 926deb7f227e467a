use crate::Cost;

use super::{Distances, Node, NodeSet};

/// A closed tour. Note that we assume that `nodes.first() == nodes.last()`, and that no node except the start node appears more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<Node>,
    cost: Cost,
}

impl From<(Vec<usize>, Cost)> for Tour {
    fn from(input: (Vec<usize>, Cost)) -> Self {
        Tour::new(input.0.into_iter().map(|n| n.into()).collect(), input.1)
    }
}

impl IntoIterator for Tour {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Tour {
    pub fn new(nodes: Vec<Node>, cost: Cost) -> Self {
        assert!(!nodes.is_empty(), "a tour needs at least its start node");
        assert_eq!(nodes.first(), nodes.last());
        debug_assert_eq!(
            nodes.iter().copied().collect::<NodeSet>().len(),
            nodes.len() - 1
        );
        Self { nodes, cost }
    }

    pub fn with_cost_from<D>(nodes: Vec<Node>, distances: &D) -> Self
    where
        D: Distances,
    {
        let mut cost = Cost::zero();
        for e in nodes.windows(2) {
            cost += distances.distance(e[0], e[1]);
        }
        Self::new(nodes, cost)
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    /// Consecutive node pairs, including the closing edge back to the start.
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.nodes.windows(2).map(|e| (e[0], e[1]))
    }

    pub fn contains_edge(&self, n1: Node, n2: Node) -> bool {
        self.edges()
            .any(|(a, b)| (a == n1 && b == n2) || (a == n2 && b == n1))
    }

    pub fn first(&self) -> Node {
        self.nodes[0]
    }

    pub fn last(&self) -> Node {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of entries, i.e. the number of visited nodes plus one.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks that the tour visits each of the nodes `1..=n` exactly once.
    pub fn is_hamiltonian(&self, n: usize) -> bool {
        let visited = self.nodes[1..].iter().copied().collect::<NodeSet>();
        self.nodes.len() == n + 1
            && visited.len() == n
            && visited.into_iter().all(|node| node.id() >= 1 && node.id() <= n)
    }
}
