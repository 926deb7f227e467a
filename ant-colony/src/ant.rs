use rand::Rng;

use crate::{
    graph::{Distances, Node, Tour},
    pheromone::PheromoneGraph,
    rng::AntRng,
    Cost,
};

/// An ant builds one closed tour per call to [Ant::construct], guided by the pheromone levels
/// and distances of a [PheromoneGraph].
///
/// The graph is borrowed for the duration of a single construction only. The internal buffers
/// are reused between constructions; the returned [Tour] is an owned copy.
#[derive(Debug, Clone)]
pub struct Ant {
    alpha: f64,
    beta: f64,
    start: Node,
    rng: AntRng,
    tour: Vec<Node>,
    unvisited: Vec<Node>,
    probabilities: Vec<f64>,
    travelled: Cost,
}

impl Ant {
    pub fn new(alpha: f64, beta: f64, start: Node, rng: AntRng) -> Self {
        Ant {
            alpha,
            beta,
            start,
            rng,
            tour: vec![],
            unvisited: vec![],
            probabilities: vec![],
            travelled: Cost::zero(),
        }
    }

    /// The start node assigned to this ant.
    pub fn start(&self) -> Node {
        self.start
    }

    /// Constructs a tour from the assigned start node.
    pub fn run(&mut self, graph: &PheromoneGraph) -> Tour {
        let start = self.start;
        self.construct(graph, start)
    }

    pub fn construct(&mut self, graph: &PheromoneGraph, start: Node) -> Tour {
        let n = graph.n();
        assert!(n >= 1, "cannot build a tour on an empty instance");
        assert!(
            start.id() >= 1 && start.id() <= n,
            "start node {} not in 1..={}",
            start,
            n
        );

        self.tour.clear();
        self.tour.push(start);
        self.travelled = Cost::zero();
        self.unvisited.clear();
        self.unvisited
            .extend(graph.nodes().filter(|&node| node != start));

        let mut current = start;
        while !self.unvisited.is_empty() {
            let pos = self.select_next(graph, current);
            let next = self.unvisited.remove(pos);
            self.travelled += graph.distance(current, next);
            self.tour.push(next);
            current = next;
        }

        self.travelled += graph.distance(current, start);
        self.tour.push(start);

        Tour::new(self.tour.clone(), self.travelled)
    }

    /// Position of the next node in `self.unvisited`, drawn by roulette-wheel selection.
    fn select_next(&mut self, graph: &PheromoneGraph, current: Node) -> usize {
        if self.unvisited.len() == 1 {
            return 0;
        }

        self.probabilities.clear();
        for &candidate in &self.unvisited {
            let pheromone = graph.pheromone(current, candidate);
            // coincident nodes have distance zero
            let distance = graph.distance(current, candidate).get().max(1) as f64;
            self.probabilities
                .push(pheromone.powf(self.alpha) * (1.0 / distance).powf(self.beta));
        }

        let total: f64 = self.probabilities.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            log::warn!(
                "Degenerate selection scores at {} (sum {}), choosing uniformly.",
                current,
                total
            );
            return self.rng.gen_range(0..self.unvisited.len());
        }
        for p in self.probabilities.iter_mut() {
            *p /= total;
        }

        let draw: f64 = self.rng.gen();
        roulette(&self.probabilities, draw)
    }
}

/// Returns the first index whose cumulative probability reaches `draw`, or the last index if
/// rounding keeps the cumulative sum below it.
pub(crate) fn roulette(probabilities: &[f64], draw: f64) -> usize {
    assert!(!probabilities.is_empty());
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative >= draw {
            return i;
        }
    }
    probabilities.len() - 1
}
