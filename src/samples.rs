use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    path::Path,
};

use ant_colony::{AcoParams, Cost};
use csv::WriterBuilder;
use serde::Serialize;

/// Outcome of repeated runs with one parameter configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub alpha: f64,
    pub beta: f64,
    pub rho: f64,
    pub ants: usize,
    pub iterations: usize,
    pub runs: usize,
    pub best: Cost,
    pub average: f64,
    pub best_seed: u64,
}

impl GridRow {
    pub fn from_costs(params: &AcoParams, costs: &[(u64, Cost)]) -> Self {
        assert!(!costs.is_empty());
        let (best_seed, best) = costs
            .iter()
            .copied()
            .min_by_key(|(_, cost)| *cost)
            .unwrap();
        let average =
            costs.iter().map(|(_, cost)| cost.as_float()).sum::<f64>() / costs.len() as f64;
        GridRow {
            alpha: params.alpha,
            beta: params.beta,
            rho: params.rho,
            ants: params.ant_population,
            iterations: params.iterations,
            runs: costs.len(),
            best,
            average,
            best_seed,
        }
    }
}

impl Display for GridRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "α={}, β={}, ρ={}: best {}, average {:.2}",
            self.alpha, self.beta, self.rho, self.best, self.average
        )
    }
}

pub fn export<R: Serialize, P: AsRef<Path>>(rows: &[R], path: P) -> Result<(), Box<dyn Error>> {
    log::info!("Exporting results to {:?}.", path.as_ref());
    let mut wtr = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod test_samples {
    use super::*;

    #[test]
    fn test_row_from_costs() {
        let params = AcoParams::new(10, 20, 0.7, 5.0, 0.5);
        let row = GridRow::from_costs(&params, &[(0, 40.into()), (1, 35.into()), (2, 36.into())]);
        assert_eq!(row.best, 35.into());
        assert_eq!(row.best_seed, 1);
        assert_eq!(row.runs, 3);
        assert_eq!(row.average, 37.0);
        assert_eq!(row.alpha, 0.7);
    }

    #[test]
    fn test_export() {
        let params = AcoParams::new(10, 20, 1.0, 2.0, 0.5);
        let rows = vec![GridRow::from_costs(&params, &[(4, 12.into())])];
        let path = std::env::temp_dir().join(format!("aco-grid-{}.csv", std::process::id()));
        export(&rows, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("alpha,beta,rho,ants,iterations,runs,best,average,best_seed")
        );
        assert_eq!(lines.next(), Some("1.0,2.0,0.5,10,20,1,12,12.0,4"));
    }
}
