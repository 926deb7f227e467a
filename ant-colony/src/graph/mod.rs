mod node;
mod point;
mod tour;

pub use node::*;
pub use point::Point;
pub use tour::Tour;

use crate::Cost;

/// Symmetric integer distances between the nodes `1..=n` of an instance.
pub trait Distances {
    fn distance(&self, n1: Node, n2: Node) -> Cost;

    /// Number of nodes.
    fn n(&self) -> usize;

    fn nodes(&self) -> Box<dyn Iterator<Item = Node>> {
        Box::new((0..self.n()).map(Node::from_index))
    }
}

/// Canonical position of the unordered pair `{n1, n2}` in an upper-triangular table.
pub(crate) fn pair_index(n1: Node, n2: Node) -> [usize; 2] {
    let i1 = n1.index();
    let i2 = n2.index();
    [i1.min(i2), i1.max(i2)]
}

#[cfg(test)]
mod test_graph {
    use super::*;

    #[test]
    fn test_pair_index_is_symmetric() {
        assert_eq!(pair_index(3.into(), 7.into()), [2, 6]);
        assert_eq!(pair_index(7.into(), 3.into()), [2, 6]);
        assert_eq!(pair_index(4.into(), 4.into()), [3, 3]);
    }
}
