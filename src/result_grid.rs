use std::{cmp::Ordering, error::Error, path::Path};

use ant_colony::{graph::Point, AcoParams, AcoResult, Colony, Solution};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{
    result_solve::path_string,
    samples::{export, GridRow},
    tour_io::export_tour,
};

#[derive(Debug, Clone)]
pub struct GridConfig {
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub rhos: Vec<f64>,
    /// Runs per configuration, with the seeds `seed, seed + 1, ...`.
    pub repeats: usize,
}

/// One parameter set per combination of alpha, beta and rho, in that nesting order.
pub fn grid_params(base: &AcoParams, config: &GridConfig) -> Vec<AcoParams> {
    let mut params = vec![];
    for &alpha in &config.alphas {
        for &beta in &config.betas {
            for &rho in &config.rhos {
                params.push(AcoParams {
                    alpha,
                    beta,
                    rho,
                    ..*base
                });
            }
        }
    }
    params
}

/// Runs `repeats` colonies with `params` and returns the summary row and the best solution.
pub fn evaluate_params(
    points: &[Point],
    params: &AcoParams,
    repeats: usize,
) -> AcoResult<(GridRow, Solution)> {
    assert!(repeats > 0);
    let mut costs = vec![];
    let mut best: Option<Solution> = None;
    for r in 0..repeats {
        let seed = params.seed.wrapping_add(r as u64);
        let solution = Colony::init(points, &params.with_seed(seed))?.run();
        log::debug!(
            "α={}, β={}, ρ={}, seed {}: {}",
            params.alpha,
            params.beta,
            params.rho,
            seed,
            solution.cost()
        );
        costs.push((seed, solution.cost()));
        if best
            .as_ref()
            .map_or(true, |b| solution.cost() < b.cost())
        {
            best = Some(solution);
        }
    }
    let best = best.expect("at least one run");
    Ok((GridRow::from_costs(params, &costs), best))
}

pub fn execute_grid_search(
    points: &[Point],
    base: &AcoParams,
    config: &GridConfig,
    output: &Path,
    write_tour: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    if config.repeats == 0 {
        return Err("the number of repeats must be positive".into());
    }
    let params = grid_params(base, config);
    if params.is_empty() {
        return Err("the parameter grid is empty".into());
    }
    // fail before spawning any work
    for p in &params {
        p.validate()?;
    }

    log::info!(
        "Grid search over {} configurations with {} runs each.",
        params.len(),
        config.repeats
    );

    let pb = ProgressBar::new(params.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template(
        "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ({pos}/{len})",
    ));
    pb.enable_steady_tick(20);
    pb.set_message("Grid");
    let outcomes: Vec<(GridRow, Solution)> = params
        .par_iter()
        .progress_with(pb)
        .map(|p| evaluate_params(points, p, config.repeats))
        .collect::<AcoResult<Vec<(GridRow, Solution)>>>()?;

    let (best_row, best_solution) = outcomes
        .iter()
        .min_by_key(|(row, _)| row.best)
        .expect("the grid is not empty");
    let (best_average, _) = outcomes
        .iter()
        .min_by(|(a, _), (b, _)| a.average.partial_cmp(&b.average).unwrap_or(Ordering::Equal))
        .expect("the grid is not empty");

    println!(
        "Best Distance: {} (α={}, β={}, ρ={}) | Best Average Distance: {:.2} (α={}, β={}, ρ={})",
        best_row.best,
        best_row.alpha,
        best_row.beta,
        best_row.rho,
        best_average.average,
        best_average.alpha,
        best_average.beta,
        best_average.rho
    );
    println!("Best Path: {}", path_string(best_solution));
    log::info!("Best configuration: {}", best_row);
    log::info!("Best average configuration: {}", best_average);

    let rows: Vec<GridRow> = outcomes.iter().map(|(row, _)| row.clone()).collect();
    export(&rows, output)?;

    if let Some(path) = write_tour {
        export_tour(path, &best_solution.tour)?;
    }

    Ok(())
}
