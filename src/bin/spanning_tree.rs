use std::{error::Error, fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use frontier_paths::{
    graphs::graph_factory::GraphFactory,
    logging::init_tracing,
    spanning::mst::{minimum_spanning_forest, MstAlgorithm},
    utility::get_progressspinner,
};
use tracing::info;

/// Computes a minimum spanning forest of the graph at `graph`, read as
/// undirected.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as edge list (`.txt`, `.el`), `.json` or `.bincode`
    #[arg(short, long)]
    graph: PathBuf,
    #[arg(short, long, value_enum, default_value_t = MstAlgorithm::Kruskal)]
    algorithm: MstAlgorithm,
    /// Path where the forest shall be saved as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let spinner = get_progressspinner("Reading graph");
    let graph = GraphFactory::from_file(&args.graph)?;
    spinner.finish_and_clear();

    let spinner = get_progressspinner("Computing spanning forest");
    let forest = minimum_spanning_forest(&graph, args.algorithm);
    spinner.finish_and_clear();

    info!(
        algorithm = ?args.algorithm,
        edges = forest.edges.len(),
        trees = forest.number_of_trees,
        weight = forest.weight,
        "spanning forest"
    );

    match args.output {
        Some(output) => {
            let writer = BufWriter::new(File::create(output)?);
            serde_json::to_writer(writer, &forest)?;
        }
        None => {
            for edge in &forest.edges {
                println!("{} {} {}", edge.tail, edge.head, edge.weight);
            }
        }
    }

    Ok(())
}
