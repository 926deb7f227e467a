use fixedbitset::FixedBitSet;

use crate::{
    graph::{Distances, Node, Tour},
    Cost,
};

/// Greedy tour that always moves to the closest unvisited node and finally returns to `start`.
///
/// Ties are broken in favour of the smaller node id.
pub fn nearest_neighbor_tour<D>(distances: &D, start: Node) -> Tour
where
    D: Distances,
{
    let n = distances.n();
    assert!(
        start.id() >= 1 && start.id() <= n,
        "start node {} not in 1..={}",
        start,
        n
    );

    let mut visited = FixedBitSet::with_capacity(n);
    visited.insert(start.index());
    let mut nodes: Vec<Node> = Vec::with_capacity(n + 1);
    nodes.push(start);
    let mut cost = Cost::zero();
    let mut current = start;

    while nodes.len() < n {
        let mut min: Option<(Node, Cost)> = None;
        for candidate in distances.nodes() {
            if visited.contains(candidate.index()) {
                continue;
            }
            let d = distances.distance(current, candidate);
            if min.map_or(true, |(_, best)| d < best) {
                min = Some((candidate, d));
            }
        }
        let (next, d) = min.expect("an unvisited node remains");
        visited.insert(next.index());
        nodes.push(next);
        cost += d;
        current = next;
    }

    cost += distances.distance(current, start);
    nodes.push(start);

    log::trace!("Nearest neighbor tour from {}: {}", start, cost);

    Tour::new(nodes, cost)
}
