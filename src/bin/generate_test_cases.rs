use std::{error::Error, fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use frontier_paths::{
    graphs::graph_factory::GraphFactory,
    logging::init_tracing,
    utility::{generate_test_cases, get_progressspinner},
};
use tracing::info;

/// Generates `number_of_tests` many random source/target test cases for the
/// graph at `graph` and saves them, with their shortest distance, as JSON at
/// `test_cases`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as edge list (`.txt`, `.el`), `.json` or `.bincode`
    #[arg(short, long)]
    graph: PathBuf,
    /// Path where the test cases shall be saved
    #[arg(short, long)]
    test_cases: PathBuf,
    /// Number of test cases
    #[arg(short, long, default_value_t = 1_000)]
    number_of_tests: u32,
    /// Seed for drawing the source/target pairs
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let spinner = get_progressspinner("Reading graph");
    let graph = GraphFactory::from_file(&args.graph)?;
    spinner.finish_and_clear();
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "read graph"
    );

    let test_cases = generate_test_cases(&graph, args.number_of_tests, args.seed)?;
    let unreachable = test_cases
        .iter()
        .filter(|test_case| test_case.distance.is_none())
        .count();
    info!(
        test_cases = test_cases.len(),
        unreachable, "generated test cases"
    );

    let writer = BufWriter::new(File::create(&args.test_cases)?);
    serde_json::to_writer(writer, &test_cases)?;

    Ok(())
}
