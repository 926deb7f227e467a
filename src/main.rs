mod result_grid;
mod result_solve;
mod samples;
mod tour_io;
mod tsplib_import;

use std::{error::Error, path::PathBuf};

use ant_colony::{distance::DistanceMatrix, graph::Distances, AcoParams};
use clap::{Args, Parser, Subcommand};

use result_grid::{execute_grid_search, GridConfig};
use result_solve::execute_solve;
use tour_io::import_tour;
use tsplib_import::tsplib_import;

#[derive(Parser)]
#[clap(about = "Ant colony optimization for the symmetric TSP", version)]
struct Cli {
    /// Raise the log level (-v debug, -vv trace)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one colony on a TSPLIB instance
    Solve(Solve),
    /// Repeat colonies over a grid of alpha, beta and rho values
    Grid(Grid),
    /// Compute the cost of a tour file
    Eval(Eval),
}

#[derive(Args, Clone, Debug)]
struct RunOptions {
    #[clap(short, long, default_value = "48")]
    ants: usize,

    #[clap(short, long, default_value = "200")]
    iterations: usize,

    #[clap(short, long, default_value = "0")]
    seed: u64,

    /// Lower bound for pheromone values after evaporation
    #[clap(long, default_value = "1e-12")]
    min_pheromone: f64,
}

impl RunOptions {
    fn to_params(&self, alpha: f64, beta: f64, rho: f64) -> AcoParams {
        AcoParams::new(self.ants, self.iterations, alpha, beta, rho)
            .with_seed(self.seed)
            .with_min_pheromone(self.min_pheromone)
    }
}

#[derive(Args)]
struct Solve {
    /// TSPLIB instance
    input: PathBuf,

    #[clap(flatten)]
    run: RunOptions,

    #[clap(long, default_value = "1")]
    alpha: f64,

    #[clap(long, default_value = "2")]
    beta: f64,

    #[clap(long, default_value = "0.5")]
    rho: f64,

    /// Construct the tours of a round one after another
    #[clap(long)]
    sequential: bool,

    /// Write the best tour to this file
    #[clap(short, long)]
    write_tour: Option<PathBuf>,
}

#[derive(Args)]
struct Grid {
    /// TSPLIB instance
    input: PathBuf,

    #[clap(flatten)]
    run: RunOptions,

    #[clap(
        long,
        value_delimiter = ',',
        default_values = &["0.68", "0.69", "0.7", "0.71", "0.72", "0.73"]
    )]
    alphas: Vec<f64>,

    #[clap(long, value_delimiter = ',', default_value = "5")]
    betas: Vec<f64>,

    #[clap(
        long,
        value_delimiter = ',',
        default_values = &["0.5", "0.52", "0.53", "0.55", "0.57", "0.58", "0.6"]
    )]
    rhos: Vec<f64>,

    /// Runs per configuration
    #[clap(short, long, default_value = "10")]
    repeats: usize,

    #[clap(short, long, default_value = "grid.csv")]
    output: PathBuf,

    /// Write the best tour of the whole grid to this file
    #[clap(short, long)]
    write_tour: Option<PathBuf>,
}

#[derive(Args)]
struct Eval {
    /// TSPLIB instance
    input: PathBuf,

    /// Tour file, one node id per line
    tour: PathBuf,
}

fn set_up_logging(verbosity: u8) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    std::fs::create_dir_all("logs")?;
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date}][{level}] {message}",
                date = chrono::Local::now().format("%H:%M:%S"),
                level = record.level(),
                message = message
            ));
        })
        .level(level)
        .chain(fern::log_file(format!(
            "logs/{}.log",
            chrono::Local::now().format("%d%m%Y-%H%M")
        ))?)
        .apply()?;

    log::info!("Logger set up!");

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    set_up_logging(cli.verbose)?;

    match cli.command {
        Command::Solve(solve) => {
            let points = tsplib_import(&solve.input)?;
            let params = solve.run.to_params(solve.alpha, solve.beta, solve.rho);
            execute_solve(
                &points,
                &params,
                !solve.sequential,
                solve.write_tour.as_deref(),
            )?;
        }
        Command::Grid(grid) => {
            let points = tsplib_import(&grid.input)?;
            let base = grid.run.to_params(1.0, 2.0, 0.5);
            let config = GridConfig {
                alphas: grid.alphas,
                betas: grid.betas,
                rhos: grid.rhos,
                repeats: grid.repeats,
            };
            execute_grid_search(
                &points,
                &base,
                &config,
                &grid.output,
                grid.write_tour.as_deref(),
            )?;
        }
        Command::Eval(eval) => {
            let points = tsplib_import(&eval.input)?;
            let distances = DistanceMatrix::load(&points)?;
            let tour = import_tour(&eval.tour, &distances)?;
            println!(
                "Tour through {} nodes with cost {}.",
                distances.n(),
                tour.cost()
            );
        }
    }
    Ok(())
}
