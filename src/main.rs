//! Nearest Neighbor TSP Solver - Command Line Interface
//!
//! Generates random Euclidean TSP instances (or loads fixed ones), builds a
//! nearest-neighbor tour and reports its length.

use clap::{Parser, Subcommand};
use nn_tsp_solver::benchmark::{Benchmark, BenchmarkConfig};
use nn_tsp_solver::generator::{InstanceConfig, Region, DEFAULT_MAX_POINTS, DEFAULT_MIN_POINTS, DEFAULT_REGION_SIDE};
use nn_tsp_solver::heuristics::construction::*;
use nn_tsp_solver::instance::TspInstance;
use nn_tsp_solver::visualization::Visualizer;
use nn_tsp_solver::Result;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nn-tsp-solver")]
#[command(version = "1.0")]
#[command(about = "Nearest-neighbor heuristic for random Euclidean TSP instances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InstanceArgs {
    /// Exact number of points (drawn from the min/max range when omitted)
    #[arg(short, long)]
    count: Option<usize>,

    /// Smallest random point count
    #[arg(long, default_value_t = DEFAULT_MIN_POINTS)]
    min_points: usize,

    /// Largest random point count
    #[arg(long, default_value_t = DEFAULT_MAX_POINTS)]
    max_points: usize,

    /// Region width
    #[arg(long, default_value_t = DEFAULT_REGION_SIDE)]
    width: u32,

    /// Region height
    #[arg(long, default_value_t = DEFAULT_REGION_SIDE)]
    height: u32,
}

impl InstanceArgs {
    fn to_config(&self, seed: Option<u64>) -> Result<InstanceConfig> {
        Ok(InstanceConfig {
            point_count: self.count,
            min_points: self.min_points,
            max_points: self.max_points,
            region: Region::new(self.width, self.height)?,
            seed,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a nearest-neighbor tour
    Solve {
        /// Instance file to solve instead of a random instance
        #[arg(short, long)]
        instance: Option<PathBuf>,

        #[command(flatten)]
        random: InstanceArgs,

        /// Random seed (a fresh one is drawn and reported when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Input index of the first stop (random when omitted)
        #[arg(long)]
        start: Option<usize>,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write an SVG drawing of the tour
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a random instance to a TSP-LIB file
    Generate {
        #[command(flatten)]
        random: InstanceArgs,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run the heuristic on many random instances
    Benchmark {
        #[command(flatten)]
        random: InstanceArgs,

        /// Number of trials
        #[arg(short, long, default_value = "100")]
        trials: usize,

        /// Seed of the first trial
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Run trials sequentially
        #[arg(long)]
        sequential: bool,

        /// Output CSV file with one row per trial
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the text report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve { instance, random, seed, start, output, svg, verbose } => {
            init_logging(verbose);
            solve_instance(instance, &random, seed, start, output, svg, verbose)
        }

        Commands::Generate { random, seed, output } => {
            init_logging(false);
            generate_instance(&random, seed, &output)
        }

        Commands::Benchmark { random, trials, seed, sequential, output, report, verbose } => {
            init_logging(verbose);
            run_benchmark(&random, trials, seed, sequential, output, report, verbose)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve_instance(
    path: Option<PathBuf>,
    random: &InstanceArgs,
    seed: Option<u64>,
    start: Option<usize>,
    output: Option<PathBuf>,
    svg: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut config = random.to_config(seed)?;
    let mut rng = config.rng();
    println!("Seed: {}", config.resolve_seed());

    let instance = match &path {
        Some(path) => {
            println!("Loading instance from {:?}...", path);
            TspInstance::from_file(path)?
        }
        None => TspInstance::generate(&config, &mut rng)?,
    };

    if verbose {
        println!("{}", instance.statistics());
    }

    let heuristic = NearestNeighborHeuristic {
        start: start.map(StartPolicy::Fixed).unwrap_or_default(),
    };
    let solution = heuristic.construct(&instance.points, &mut rng)?;

    for (i, d) in solution.segment_distances.iter().enumerate() {
        println!("Distance between vertex {} and {}: {}", i, i + 1, d);
    }
    println!("Total Distance: {}", solution.cost);

    if verbose {
        println!("\n{}", solution);
        for (i, p) in solution.tour.iter().enumerate() {
            println!("  {:>3}: {}", i, p);
        }
    }

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&solution)?;
        std::fs::write(&out_path, json)?;
        println!("Solution saved to {:?}", out_path);
    }

    if let Some(svg_path) = svg {
        let viz = Visualizer::new();
        let drawing = viz.generate_svg(&instance, &solution);
        viz.save_svg(&drawing, &svg_path)?;
        println!("Visualization saved to {:?}", svg_path);
    }

    Ok(())
}

fn generate_instance(random: &InstanceArgs, seed: Option<u64>, output: &PathBuf) -> Result<()> {
    let mut config = random.to_config(seed)?;
    let seed = config.resolve_seed();
    let mut rng = config.rng();

    let mut instance = TspInstance::generate(&config, &mut rng)?;
    instance.comment = format!("{} (seed {})", instance.comment, seed);
    instance.save(output)?;

    println!("Wrote {} points to {:?} (seed {})", instance.dimension(), output, seed);
    Ok(())
}

fn run_benchmark(
    random: &InstanceArgs,
    trials: usize,
    seed: u64,
    sequential: bool,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let config = BenchmarkConfig {
        trials,
        base_seed: seed,
        instance: random.to_config(None)?,
        parallel: !sequential,
        show_progress: verbose,
    };

    let mut benchmark = Benchmark::new(config);
    benchmark.run()?;

    let text = benchmark.generate_report();
    println!("{}", text);

    if let Some(csv_path) = output {
        benchmark.export_to_csv(&csv_path)?;
        println!("Results exported to {:?}", csv_path);
    }

    if let Some(report_path) = report {
        std::fs::write(&report_path, &text)?;
        println!("Report saved to {:?}", report_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_args(args: &[&str]) -> (InstanceArgs, Option<u64>) {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Solve { random, seed, .. } => (random, seed),
            _ => panic!("expected solve"),
        }
    }

    #[test]
    fn test_seed_flag_reaches_config() {
        let (random, seed) = solve_args(&["nn-tsp-solver", "solve", "--count", "3", "--seed", "9"]);
        let mut config = random.to_config(seed).unwrap();

        assert_eq!(config.point_count, Some(3));
        assert_eq!(config.resolve_seed(), 9);
    }

    #[test]
    fn test_missing_seed_is_drawn_once() {
        let (random, seed) = solve_args(&["nn-tsp-solver", "solve", "--count", "3"]);
        assert_eq!(seed, None);

        let mut config = random.to_config(seed).unwrap();
        let drawn = config.resolve_seed();
        let mut replay = random.to_config(Some(drawn)).unwrap();

        let mut first = config.rng();
        let mut second = replay.rng();
        let a = TspInstance::generate(&config, &mut first).unwrap();
        let b = TspInstance::generate(&replay, &mut second).unwrap();
        assert_eq!(a.points, b.points);
    }
}
