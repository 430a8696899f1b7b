use std::{error::Error, fs::File, io::BufReader, io::BufWriter, path::PathBuf, time::Duration};

use clap::Parser;
use frontier_paths::{
    graphs::graph_factory::GraphFactory,
    logging::init_tracing,
    search::{alt::landmark::Landmarks, path::ShortestPathTestCase, Strategy},
    utility::{get_progressspinner, validate_and_time},
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

/// Answers the test cases at `test_cases` with the chosen strategy, checks
/// every answer and reports the average query time. A* and Greedy Best-First
/// are guided by landmark lower bounds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as edge list (`.txt`, `.el`), `.json` or `.bincode`
    #[arg(short, long)]
    graph: PathBuf,
    /// Path of the test cases
    #[arg(short, long)]
    test_cases: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Strategy::Dijkstra)]
    strategy: Strategy,
    /// Number of random landmarks for the heuristic
    #[arg(short, long, default_value_t = 8)]
    landmarks: u32,
    /// Seed for choosing the landmarks
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Path where the results shall be saved
    #[arg(long)]
    timing_results: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let spinner = get_progressspinner("Reading test cases");
    let reader = BufReader::new(File::open(&args.test_cases)?);
    let test_cases: Vec<ShortestPathTestCase<String>> = serde_json::from_reader(reader)?;
    spinner.finish_and_clear();

    let spinner = get_progressspinner("Reading graph");
    let graph = GraphFactory::from_file(&args.graph)?;
    spinner.finish_and_clear();

    let landmarks = match args.strategy {
        Strategy::Dijkstra => Landmarks {
            landmarks: Vec::new(),
        },
        Strategy::AStar | Strategy::GreedyBestFirst => {
            let mut rng = StdRng::seed_from_u64(args.seed);
            Landmarks::random(&graph, args.landmarks, &mut rng)?
        }
    };

    let results = validate_and_time(&graph, &test_cases, args.strategy, |target| {
        landmarks.heuristic(target.clone())
    })?;

    let average = results
        .iter()
        .map(|result| result.timing_in_seconds)
        .sum::<f64>()
        / results.len().max(1) as f64;
    let expanded = results
        .iter()
        .map(|result| result.expanded as f64)
        .sum::<f64>()
        / results.len().max(1) as f64;
    info!(
        strategy = ?args.strategy,
        queries = results.len(),
        average = ?Duration::from_secs_f64(average),
        expanded,
        "all answers valid"
    );

    if let Some(timing_results) = args.timing_results {
        let writer = BufWriter::new(File::create(timing_results)?);
        serde_json::to_writer(writer, &results)?;
    }

    Ok(())
}
