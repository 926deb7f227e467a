use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    ant::Ant,
    error::AcoResult,
    graph::{Distances, Node, Point, Tour},
    params::AcoParams,
    pheromone::PheromoneGraph,
    rng::SeedSequence,
    Cost,
};

/// Progress of a run after one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IterationReport {
    /// Zero-based index of the round that just finished.
    pub iteration: usize,
    pub iterations: usize,
    /// Shortest tour constructed in this round.
    pub round_best: Cost,
    /// Shortest tour constructed so far.
    pub best: Cost,
}

/// The shortest tour of a run and the round in which it was first found.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub tour: Tour,
    pub iteration: usize,
    pub initial_pheromone: f64,
}

impl Solution {
    pub fn cost(&self) -> Cost {
        self.tour.cost()
    }
}

/// A population of ants sharing one [PheromoneGraph].
///
/// Every round, all ants construct a tour against the same pheromone state. Only after the
/// whole round has finished is the graph updated, once, with all tours of that round.
#[derive(Debug, Clone)]
pub struct Colony {
    graph: PheromoneGraph,
    ants: Vec<Ant>,
    params: AcoParams,
}

impl Colony {
    /// Loads the nodes, seeds the pheromone and places every ant on a random start node.
    pub fn init(points: &[Point], params: &AcoParams) -> AcoResult<Self> {
        params.validate()?;

        let mut seeds = SeedSequence::new(params.seed);
        let mut rng = seeds.next_rng();

        let mut graph = PheromoneGraph::load(points, params.rho)?
            .with_min_pheromone(params.min_pheromone);
        let n = graph.n();
        let seed_node = Node::new(rng.gen_range(1..=n));
        graph.initialize_pheromone(params.ant_population, seed_node)?;

        let ants = (0..params.ant_population)
            .map(|_| {
                let start = Node::new(rng.gen_range(1..=n));
                Ant::new(params.alpha, params.beta, start, seeds.next_rng())
            })
            .collect::<Vec<Ant>>();

        log::info!(
            "Colony of {} ants on {} nodes (alpha={}, beta={}, rho={}, seed={}).",
            params.ant_population,
            n,
            params.alpha,
            params.beta,
            params.rho,
            params.seed
        );

        Ok(Colony {
            graph,
            ants,
            params: *params,
        })
    }

    pub fn graph(&self) -> &PheromoneGraph {
        &self.graph
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn params(&self) -> &AcoParams {
        &self.params
    }

    /// Runs all rounds, constructing the tours of a round one after another.
    pub fn run(self) -> Solution {
        self.run_with(false, |_| {})
    }

    /// Runs all rounds, constructing the tours of a round in parallel.
    pub fn run_par(self) -> Solution {
        self.run_with(true, |_| {})
    }

    /// Runs all rounds and reports the progress to `observer` after each of them.
    pub fn run_with<F>(mut self, parallel: bool, mut observer: F) -> Solution
    where
        F: FnMut(&IterationReport),
    {
        let iterations = self.params.iterations;
        let mut best: Option<(Tour, usize)> = None;

        for iteration in 0..iterations {
            let tours = self.construct_round(parallel);

            let round_best = tours
                .iter()
                .min_by_key(|tour| tour.cost())
                .expect("the colony has at least one ant");
            if best
                .as_ref()
                .map_or(true, |(tour, _)| round_best.cost() < tour.cost())
            {
                log::debug!(
                    "Iteration {}/{}: new best tour of cost {}.",
                    iteration + 1,
                    iterations,
                    round_best.cost()
                );
                best = Some((round_best.clone(), iteration));
            }
            let round_best = round_best.cost();

            self.graph.update(&tours);

            let report = IterationReport {
                iteration,
                iterations,
                round_best,
                best: best.as_ref().map(|(tour, _)| tour.cost()).unwrap_or_else(Cost::max),
            };
            log::trace!(
                "Iteration {}/{}: round best {}, best {}",
                iteration + 1,
                iterations,
                report.round_best,
                report.best
            );
            observer(&report);
        }

        let (tour, iteration) = best.expect("the number of iterations is positive");
        log::info!(
            "Finished after {} iterations. Best tour cost: {} (found in iteration {}).",
            iterations,
            tour.cost(),
            iteration + 1
        );

        Solution {
            tour,
            iteration,
            initial_pheromone: self.graph.initial_pheromone().unwrap_or_default(),
        }
    }

    /// The pheromone graph is only read while the ants construct their tours.
    fn construct_round(&mut self, parallel: bool) -> Vec<Tour> {
        let graph = &self.graph;
        if parallel {
            self.ants.par_iter_mut().map(|ant| ant.run(graph)).collect()
        } else {
            self.ants.iter_mut().map(|ant| ant.run(graph)).collect()
        }
    }
}

/// Runs a colony with `params` on the given nodes, constructing tours in parallel.
pub fn solve(points: &[Point], params: &AcoParams) -> AcoResult<Solution> {
    Ok(Colony::init(points, params)?.run_par())
}

#[cfg(test)]
mod test_colony {
    use super::*;
    use crate::{
        distance::DistanceMatrix,
        error::{AcoError, ConfigError, LoadError},
    };

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 0.0, 1.0),
            Point::new(3, 1.0, 1.0),
            Point::new(4, 1.0, 0.0),
        ]
    }

    ///  1 ---- 2
    ///  |      |
    ///  4 ---- 3
    ///
    /// Sides have length 32, diagonals 45.
    fn square() -> Vec<Point> {
        vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 100.0, 0.0),
            Point::new(3, 100.0, 100.0),
            Point::new(4, 0.0, 100.0),
        ]
    }

    fn att_sample() -> Vec<Point> {
        vec![
            Point::new(1, 6734.0, 1453.0),
            Point::new(2, 2233.0, 10.0),
            Point::new(3, 5530.0, 1424.0),
            Point::new(4, 401.0, 841.0),
            Point::new(5, 3082.0, 1644.0),
            Point::new(6, 7608.0, 4458.0),
            Point::new(7, 7573.0, 3716.0),
            Point::new(8, 7265.0, 1268.0),
            Point::new(9, 6898.0, 1885.0),
            Point::new(10, 1112.0, 2049.0),
        ]
    }

    #[test]
    fn test_unit_square() {
        // every pair of corners, diagonals included, is at distance 1, so any tour has length 4
        let distances = DistanceMatrix::load(&unit_square()).unwrap();
        for n1 in distances.nodes() {
            for n2 in distances.nodes() {
                if n1 != n2 {
                    assert_eq!(distances.distance(n1, n2), 1.into());
                }
            }
        }
        let params = AcoParams::new(4, 10, 1.0, 2.0, 0.5).with_seed(42);
        let solution = solve(&unit_square(), &params).unwrap();
        assert_eq!(solution.cost(), 4.into());
        assert!(solution.tour.is_hamiltonian(4));
    }

    #[test]
    fn test_square_perimeter() {
        let params = AcoParams::new(4, 10, 1.0, 2.0, 0.5).with_seed(42);
        let colony = Colony::init(&square(), &params).unwrap();
        let solution = colony.run();
        assert_eq!(solution.cost(), 128.into());
        for (n1, n2) in solution.tour.edges() {
            // corners are visited in cyclic order, never along a diagonal
            let diff = (n1.id() as isize - n2.id() as isize).abs();
            assert!(diff == 1 || diff == 3);
        }
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let params = AcoParams::new(12, 15, 1.0, 3.0, 0.4).with_seed(7);
        let seq = Colony::init(&att_sample(), &params).unwrap().run();
        let par = Colony::init(&att_sample(), &params).unwrap().run_par();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_reproducible() {
        let params = AcoParams::new(6, 8, 1.0, 2.0, 0.5).with_seed(3);
        let a = solve(&att_sample(), &params).unwrap();
        let b = solve(&att_sample(), &params).unwrap();
        assert_eq!(a, b);
        assert!(a.tour.is_hamiltonian(10));
        let distances = DistanceMatrix::load(&att_sample()).unwrap();
        let recomputed = Tour::with_cost_from(a.tour.nodes().to_vec(), &distances);
        assert_eq!(a.cost(), recomputed.cost());
    }

    #[test]
    fn test_reports() {
        let params = AcoParams::new(5, 12, 1.0, 2.0, 0.5).with_seed(1);
        let colony = Colony::init(&att_sample(), &params).unwrap();
        let mut reports: Vec<IterationReport> = vec![];
        let solution = colony.run_with(false, |report| reports.push(*report));

        assert_eq!(reports.len(), 12);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.iteration, i);
            assert_eq!(report.iterations, 12);
            assert!(report.best <= report.round_best);
        }
        for w in reports.windows(2) {
            assert!(w[1].best <= w[0].best);
        }
        let last = reports.last().unwrap();
        assert_eq!(last.best, solution.cost());
        assert_eq!(reports[solution.iteration].round_best, solution.cost());
        let min_round = reports.iter().map(|r| r.round_best).min().unwrap();
        assert_eq!(min_round, solution.cost());
    }

    #[test]
    fn test_init() {
        let params = AcoParams::new(7, 3, 1.0, 2.0, 0.5).with_seed(5);
        let colony = Colony::init(&att_sample(), &params).unwrap();
        assert_eq!(colony.ants().len(), 7);
        assert!(colony.graph().is_initialized());
        assert_eq!(colony.params(), &params);
        assert_eq!(colony.graph().rho(), 0.5);
        assert_eq!(colony.graph().min_pheromone(), params.min_pheromone);
        for ant in colony.ants() {
            assert!(ant.start().id() >= 1 && ant.start().id() <= 10);
        }
        let level = colony.graph().initial_pheromone().unwrap();
        assert!(level > 0.0);
        let solution = colony.run();
        assert_eq!(solution.initial_pheromone, level);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let params = AcoParams::new(4, 0, 1.0, 2.0, 0.5);
        assert_eq!(
            solve(&unit_square(), &params).unwrap_err(),
            AcoError::Config(ConfigError::NoIterations)
        );
    }

    #[test]
    fn test_empty_input() {
        let params = AcoParams::default();
        assert_eq!(
            solve(&[], &params).unwrap_err(),
            AcoError::Load(LoadError::Empty)
        );
    }

    #[test]
    fn test_single_node() {
        let params = AcoParams::new(3, 2, 1.0, 2.0, 0.5);
        let solution = solve(&[Point::new(1, 4.0, 2.0)], &params).unwrap();
        assert_eq!(solution.cost(), Cost::zero());
        assert_eq!(solution.tour.nodes(), &[Node::new(1), Node::new(1)]);
    }
}
