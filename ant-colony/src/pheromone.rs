use ndarray::Array2;

use crate::{
    distance::DistanceMatrix,
    error::LoadError,
    graph::{pair_index, Distances, Node, Point, Tour},
    nearest_neighbor::nearest_neighbor_tour,
    Cost,
};

/// The environment shared by all ants: distances and the pheromone level of every node pair.
///
/// Pheromone is stored once per unordered pair, at `[min(i, j), max(i, j)]`, exactly like the
/// distances. Ants only read from it; [PheromoneGraph::update] is the single writer.
#[derive(Debug, Clone)]
pub struct PheromoneGraph {
    distances: DistanceMatrix,
    pheromone: Array2<f64>,
    rho: f64,
    min_pheromone: f64,
    initial_pheromone: Option<f64>,
}

impl PheromoneGraph {
    /// Loads the node list and precomputes all distances. Pheromone is not initialized yet.
    pub fn load(points: &[Point], rho: f64) -> Result<Self, LoadError> {
        assert!(rho >= 0.0 && rho < 1.0, "rho must lie in [0, 1), got {}", rho);
        let distances = DistanceMatrix::load(points)?;
        let n = distances.n();
        Ok(PheromoneGraph {
            distances,
            pheromone: Array2::zeros((n, n)),
            rho,
            min_pheromone: f64::MIN_POSITIVE,
            initial_pheromone: None,
        })
    }

    pub fn with_min_pheromone(mut self, min_pheromone: f64) -> Self {
        assert!(min_pheromone > 0.0, "the pheromone floor must be positive");
        self.min_pheromone = min_pheromone;
        self
    }

    /// Seeds every pair with `ant_population / C`, where `C` is the cost of the nearest
    /// neighbor tour from `start`. Returns the seeded level.
    pub fn initialize_pheromone(
        &mut self,
        ant_population: usize,
        start: Node,
    ) -> Result<f64, LoadError> {
        assert!(ant_population > 0, "the ant population must be positive");
        let n = self.n();
        let nn_tour = nearest_neighbor_tour(&self.distances, start);
        let cost = nn_tour.cost();

        let level = if n == 1 {
            // There is no pair to seed.
            ant_population as f64
        } else if cost.is_zero() {
            return Err(LoadError::Degenerate { nodes: n });
        } else {
            ant_population as f64 / cost.as_float()
        };

        for i in 0..n {
            for j in i + 1..n {
                self.pheromone[[i, j]] = level;
            }
        }
        self.initial_pheromone = Some(level);

        log::info!(
            "Initial pheromone: {} ({} ants, nearest neighbor tour from {} of cost {}).",
            level,
            ant_population,
            start,
            cost
        );

        Ok(level)
    }

    pub fn is_initialized(&self) -> bool {
        self.initial_pheromone.is_some()
    }

    pub fn initial_pheromone(&self) -> Option<f64> {
        self.initial_pheromone
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn min_pheromone(&self) -> f64 {
        self.min_pheromone
    }

    pub fn pheromone(&self, n1: Node, n2: Node) -> f64 {
        assert!(self.is_initialized(), "pheromone read before initialization");
        assert!(n1 != n2, "no pheromone on the loop {} -> {}", n1, n2);
        self.check_range(n1, n2);
        self.pheromone[pair_index(n1, n2)]
    }

    /// Applies one round of evaporation and then reinforces every edge of every tour by the
    /// inverse of that tour's cost.
    ///
    /// All pairs evaporate exactly once, before any deposit, so all tours of a round are
    /// added onto the same evaporated baseline.
    pub fn update<'t, I>(&mut self, tours: I)
    where
        I: IntoIterator<Item = &'t Tour>,
    {
        assert!(self.is_initialized(), "pheromone update before initialization");
        let n = self.n();

        let keep = 1.0 - self.rho;
        let floor = self.min_pheromone;
        for i in 0..n {
            for j in i + 1..n {
                let p = &mut self.pheromone[[i, j]];
                *p = (*p * keep).max(floor);
            }
        }

        for tour in tours {
            assert_eq!(
                tour.len(),
                n + 1,
                "tour of {} entries on an instance of {} nodes",
                tour.len(),
                n
            );
            debug_assert!(tour.is_hamiltonian(n));
            if tour.cost().is_zero() {
                debug_assert_eq!(n, 1, "zero-length tour on {} nodes", n);
                continue;
            }
            let deposit = 1.0 / tour.cost().as_float();
            for (n1, n2) in tour.edges() {
                self.check_range(n1, n2);
                self.pheromone[pair_index(n1, n2)] += deposit;
            }
        }
    }

    fn check_range(&self, n1: Node, n2: Node) {
        let n = self.n();
        assert!(
            n1.id() >= 1 && n1.id() <= n && n2.id() >= 1 && n2.id() <= n,
            "node out of range: {} or {} not in 1..={}",
            n1,
            n2,
            n
        );
    }
}

impl Distances for PheromoneGraph {
    fn distance(&self, n1: Node, n2: Node) -> Cost {
        self.distances.distance(n1, n2)
    }

    fn n(&self) -> usize {
        self.distances.n()
    }
}
