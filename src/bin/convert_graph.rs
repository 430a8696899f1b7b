use std::{error::Error, path::PathBuf};

use clap::Parser;
use frontier_paths::{
    graphs::graph_factory::GraphFactory, logging::init_tracing, utility::get_progressspinner,
};
use tracing::info;

/// Converts a graph file. Input and output formats follow the file
/// extensions; edge lists can only be read.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as edge list (`.txt`, `.el`), `.json` or `.bincode`
    #[arg(short, long)]
    infile: PathBuf,
    /// Output as `.json` or `.bincode`
    #[arg(short, long)]
    outfile: PathBuf,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let spinner = get_progressspinner("Reading graph");
    let graph = GraphFactory::from_file(&args.infile)?;
    spinner.finish_and_clear();

    let spinner = get_progressspinner("Writing graph");
    GraphFactory::to_file(&graph, &args.outfile)?;
    spinner.finish_and_clear();

    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        outfile = ?args.outfile,
        "converted graph"
    );

    Ok(())
}
