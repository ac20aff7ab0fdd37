//! VRP-QUBO - Command Line Interface
//!
//! Builds routing models for external samplers and interprets their samples.

use clap::{Parser, Subcommand};
use vrp_qubo::adjacency::AdjacencyMatrix;
use vrp_qubo::benchmark::{BaselineConfig, RandomBaseline};
use vrp_qubo::decoder::decode_sample;
use vrp_qubo::instance::VrpInstance;
use vrp_qubo::model::construct_objective;
use vrp_qubo::sample::Sample;
use vrp_qubo::solution::RoutingSolution;
use vrp_qubo::VrpError;

use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "vrp-qubo")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Binary quadratic models for the multi-vehicle routing problem")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the objective and export it for an external sampler
    Model {
        /// Distance matrix file (depot in the last row/column)
        #[arg(short, long)]
        distances: PathBuf,

        /// Number of vehicles
        #[arg(short, long, default_value = "1")]
        vehicles: usize,

        /// Write the model as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(long)]
        verbose: bool,
    },

    /// Decode a sample returned by the sampler
    Decode {
        /// Distance matrix file (depot in the last row/column)
        #[arg(short, long)]
        distances: PathBuf,

        /// Sample JSON file ({"vehicle_vertex_step": value, ...})
        #[arg(short, long)]
        sample: PathBuf,

        /// Number of vehicles
        #[arg(short, long, default_value = "1")]
        vehicles: usize,

        /// Save decoded routes as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compare against a random baseline with this many trials (0 = skip)
        #[arg(long, default_value = "0")]
        baseline_trials: usize,

        /// Random seed for the baseline
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Convert an edge-list CSV (source,target,weight) into an adjacency matrix
    Adjacency {
        /// Edge-list CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Print the node name to index mapping
        #[arg(long)]
        mapping: bool,
    },

    /// Evaluate random partitions of the locations
    Baseline {
        /// Distance matrix file (depot in the last row/column)
        #[arg(short, long)]
        distances: PathBuf,

        /// Number of vehicles
        #[arg(short, long, default_value = "1")]
        vehicles: usize,

        /// Number of random partitions
        #[arg(short, long, default_value = "10000")]
        trials: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Export per-trial costs to CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Analyze an instance
    Analyze {
        /// Distance matrix file (depot in the last row/column)
        #[arg(short, long)]
        distances: PathBuf,

        /// Number of vehicles
        #[arg(short, long, default_value = "1")]
        vehicles: usize,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Model { distances, vehicles, output, verbose } => {
            build_model(&distances, vehicles, output, verbose)
        }

        Commands::Decode { distances, sample, vehicles, output, baseline_trials, seed } => {
            decode(&distances, &sample, vehicles, output, baseline_trials, seed)
        }

        Commands::Adjacency { input, mapping } => print_adjacency(&input, mapping),

        Commands::Baseline { distances, vehicles, trials, seed, output, progress } => {
            run_baseline(&distances, vehicles, trials, seed, output, progress)
        }

        Commands::Analyze { distances, vehicles } => analyze_instance(&distances, vehicles),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_model(path: &PathBuf, vehicles: usize, output: Option<PathBuf>, verbose: bool) -> Result<(), VrpError> {
    println!("Loading distances from {:?}...", path);
    let instance = VrpInstance::from_file(path, vehicles)?;

    if verbose {
        println!("{}", instance.statistics());
    }

    let start = Instant::now();
    let (variables, model) = construct_objective(instance.num_locations(), &instance.distances, instance.num_vehicles)?;
    let elapsed = start.elapsed();

    println!("\n========== Model ==========");
    println!("Variables: {}", variables.len());
    println!("Linear terms: {}", model.num_linear());
    println!("Quadratic terms: {}", model.num_quadratic());
    println!("Build time: {:.4}s", elapsed.as_secs_f64());

    if let Some(out_path) = output {
        model.to_serializable().save(&out_path)?;
        println!("\nModel saved to {:?}", out_path);
    }

    Ok(())
}

fn decode(
    path: &PathBuf,
    sample_path: &PathBuf,
    vehicles: usize,
    output: Option<PathBuf>,
    baseline_trials: usize,
    seed: u64,
) -> Result<(), VrpError> {
    let instance = VrpInstance::from_file(path, vehicles)?;
    let sample = Sample::from_file(sample_path)?;
    let n = instance.num_locations();

    log::info!("Decoding {} sample entries for {} vehicles", sample.len(), vehicles);

    let routes = decode_sample(&sample, instance.num_vehicles, n)?;
    let (_, model) = construct_objective(n, &instance.distances, instance.num_vehicles)?;
    let energy = model.energy(&sample)?;

    let solution = RoutingSolution::from_routes(routes, &instance.distances, &sample_path.to_string_lossy())
        .with_energy(energy);

    print!("{}", solution);
    println!("Objective energy: {}", energy);
    println!("Visits every location once: {}", solution.is_complete(n));

    if baseline_trials > 0 {
        let config = BaselineConfig {
            trials: baseline_trials,
            seed,
            ..Default::default()
        };
        let baseline = RandomBaseline::new(config).run(&instance.distances, instance.num_vehicles)?;
        println!("\nRandom baseline best cost: {:.2}", baseline.best_cost());
        println!("Gap to baseline: {:.2}%", baseline.gap_percent(solution.cost));
    }

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&solution)?;
        std::fs::write(&out_path, json)?;
        println!("\nSolution saved to {:?}", out_path);
    }

    Ok(())
}

fn print_adjacency(path: &PathBuf, mapping: bool) -> Result<(), VrpError> {
    let matrix = AdjacencyMatrix::from_csv_path(path)?;

    if mapping {
        for (idx, name) in matrix.names().iter().enumerate() {
            println!("{} {}", name, idx);
        }
        println!();
    }

    print!("{}", matrix);
    Ok(())
}

fn run_baseline(
    path: &PathBuf,
    vehicles: usize,
    trials: usize,
    seed: u64,
    output: Option<PathBuf>,
    progress: bool,
) -> Result<(), VrpError> {
    let instance = VrpInstance::from_file(path, vehicles)?;

    let config = BaselineConfig {
        trials,
        seed,
        show_progress: progress,
    };

    let start = Instant::now();
    let result = RandomBaseline::new(config).run(&instance.distances, instance.num_vehicles)?;

    println!("{}", result.generate_report());
    println!("Time: {:.4}s", start.elapsed().as_secs_f64());

    if let Some(out_path) = output {
        result.export_trials_csv(&out_path)?;
        println!("Trials exported to {:?}", out_path);
    }

    Ok(())
}

fn analyze_instance(path: &PathBuf, vehicles: usize) -> Result<(), VrpError> {
    let instance = VrpInstance::from_file(path, vehicles)?;

    println!("========== Instance Analysis ==========\n");
    println!("{}", instance.statistics());

    Ok(())
}
