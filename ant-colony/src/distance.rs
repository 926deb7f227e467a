use ndarray::Array2;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    error::LoadError,
    graph::{pair_index, Distances, Node, Point},
    Cost,
};

/// Pseudo-Euclidean distance of TSPLIB's `ATT` instances.
///
/// `r = sqrt((dx² + dy²) / 10)` is rounded to the nearest integer `t`, and `t + 1` is
/// returned whenever that rounding went down.
pub fn pseudo_euclidean(p1: &Point, p2: &Point) -> Cost {
    let xd = p1.x - p2.x;
    let yd = p1.y - p2.y;
    let r = ((xd * xd + yd * yd) / 10.0).sqrt();
    let t = r.round();
    if t < r {
        Cost::new(t as usize + 1)
    } else {
        Cost::new(t as usize)
    }
}

/// Validates a node list: ids must be `1..=n` in order and coordinates finite.
pub fn validate_points(points: &[Point]) -> Result<(), LoadError> {
    if points.is_empty() {
        return Err(LoadError::Empty);
    }
    for (i, p) in points.iter().enumerate() {
        if p.node.id() != i + 1 {
            return Err(LoadError::UnexpectedId {
                expected: i + 1,
                found: p.node.id(),
            });
        }
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(LoadError::NonFiniteCoordinate { id: p.node.id() });
        }
    }
    Ok(())
}

/// All pairwise distances of an instance, computed once at load time.
///
/// Every unordered pair is stored once, at `[min(i, j), max(i, j)]`.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    matrix: Array2<Cost>,
    points: Vec<Point>,
}

impl DistanceMatrix {
    pub fn load(points: &[Point]) -> Result<Self, LoadError> {
        validate_points(points)?;

        let n = points.len();
        log::info!("Computing pseudo-Euclidean distances of {} nodes.", n);

        let rows = (0..n)
            .into_par_iter()
            .map(|i| {
                (i + 1..n)
                    .map(|j| pseudo_euclidean(&points[i], &points[j]))
                    .collect::<Vec<Cost>>()
            })
            .collect::<Vec<Vec<Cost>>>();

        let mut matrix = Array2::from_elem((n, n), Cost::zero());
        for (i, row) in rows.into_iter().enumerate() {
            for (offset, cost) in row.into_iter().enumerate() {
                matrix[[i, i + 1 + offset]] = cost;
            }
        }

        Ok(DistanceMatrix {
            matrix,
            points: points.to_vec(),
        })
    }

    pub fn point(&self, node: Node) -> &Point {
        &self.points[node.index()]
    }
}

impl Distances for DistanceMatrix {
    fn distance(&self, n1: Node, n2: Node) -> Cost {
        let n = self.points.len();
        assert!(
            n1.id() >= 1 && n1.id() <= n && n2.id() >= 1 && n2.id() <= n,
            "node out of range: {} or {} not in 1..={}",
            n1,
            n2,
            n
        );
        self.matrix[pair_index(n1, n2)]
    }

    fn n(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod test_distance {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(i + 1, x, y))
            .collect()
    }

    #[test]
    fn test_pseudo_euclidean_rounds_up() {
        // r = sqrt(10) = 3.162, t = 3 < r
        let p = points(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(pseudo_euclidean(&p[0], &p[1]), 4.into());

        // r = sqrt(90) = 9.487, t = 9 < r
        let p = points(&[(0.0, 0.0), (0.0, 30.0)]);
        assert_eq!(pseudo_euclidean(&p[0], &p[1]), 10.into());
    }

    #[test]
    fn test_pseudo_euclidean_exact() {
        // r = sqrt(1000 / 10) = 10
        let p = points(&[(0.0, 0.0), (10.0, 30.0)]);
        assert_eq!(pseudo_euclidean(&p[0], &p[1]), 10.into());
        assert_eq!(pseudo_euclidean(&p[0], &p[0]), 0.into());
    }

    #[test]
    fn test_pseudo_euclidean_rounded_up_by_round() {
        // r = sqrt(122.5) = 11.068 -> 12
        let p = points(&[(0.0, 0.0), (35.0, 0.0)]);
        assert_eq!(pseudo_euclidean(&p[0], &p[1]), 12.into());
        // r = sqrt(12.25) = 3.5 rounds to 4, which is not below r
        let p = points(&[(0.0, 0.0), (3.5, 10.5)]);
        assert_eq!(pseudo_euclidean(&p[0], &p[1]), 4.into());
    }

    #[test]
    fn test_matrix_symmetric() {
        let p = points(&[(6734.0, 1453.0), (2233.0, 10.0), (5530.0, 1424.0), (401.0, 841.0)]);
        let dm = DistanceMatrix::load(&p).unwrap();
        for n1 in dm.nodes() {
            assert_eq!(dm.distance(n1, n1), Cost::zero());
            for n2 in dm.nodes() {
                assert_eq!(dm.distance(n1, n2), dm.distance(n2, n1));
                assert_eq!(dm.distance(n1, n2), pseudo_euclidean(dm.point(n1), dm.point(n2)));
                if n1 != n2 {
                    assert!(dm.distance(n1, n2) > Cost::zero());
                }
            }
        }
        // att48 nodes 1 and 2
        assert_eq!(dm.distance(1.into(), 2.into()), 1495.into());
    }

    #[test]
    fn test_load_errors() {
        assert_eq!(DistanceMatrix::load(&[]).unwrap_err(), LoadError::Empty);

        let p = vec![Point::new(1, 0.0, 0.0), Point::new(3, 1.0, 1.0)];
        assert_eq!(
            DistanceMatrix::load(&p).unwrap_err(),
            LoadError::UnexpectedId {
                expected: 2,
                found: 3
            }
        );

        let p = vec![Point::new(1, 0.0, f64::NAN)];
        assert_eq!(
            DistanceMatrix::load(&p).unwrap_err(),
            LoadError::NonFiniteCoordinate { id: 1 }
        );
    }

    #[test]
    #[should_panic]
    fn test_out_of_range() {
        let dm = DistanceMatrix::load(&points(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        dm.distance(1.into(), 3.into());
    }
}
