use std::{error::Error, path::Path};

use ant_colony::{graph::Point, AcoParams, Colony, IterationReport, Solution};
use indicatif::{ProgressBar, ProgressStyle};

use crate::tour_io::export_tour;

pub fn execute_solve(
    points: &[Point],
    params: &AcoParams,
    parallel: bool,
    write_tour: Option<&Path>,
) -> Result<Solution, Box<dyn Error>> {
    let colony = Colony::init(points, params)?;

    let pb = ProgressBar::new(params.iterations as u64);
    pb.set_style(ProgressStyle::default_bar().template(
        "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ({pos}/{len})",
    ));
    pb.set_message("ACO");
    let solution = colony.run_with(parallel, |report: &IterationReport| {
        pb.set_message(&format!("best {}", report.best));
        pb.inc(1);
    });
    pb.finish();

    println!("Best Distance: {}", solution.cost());
    println!("Best Path: {}", path_string(&solution));

    if let Some(path) = write_tour {
        export_tour(path, &solution.tour)?;
    }

    Ok(solution)
}

pub fn path_string(solution: &Solution) -> String {
    solution
        .tour
        .nodes()
        .iter()
        .map(|n| n.id().to_string())
        .collect::<Vec<String>>()
        .join(" ")
}
