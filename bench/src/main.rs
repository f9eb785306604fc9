use std::io::Write;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use influence_core::{
    influence_scores, weighted_influence_scores, CentralityConfig, NodeId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

mod generate;
mod report;

#[derive(Parser, Debug)]
#[command(name = "influence-bench")]
#[command(about = "Generate a graph and time influence score computation", long_about = None)]
struct Cli {
    /// Which centrality runs to perform
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Number of nodes
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    nodes: u64,

    /// Partner draws per node for the random shape
    #[arg(long, default_value_t = 5)]
    degree: u32,

    /// Graph shape
    #[arg(long, value_enum, default_value_t = Shape::Random)]
    shape: Shape,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Spread per-source runs over all cores
    #[arg(long)]
    parallel: bool,

    /// Only print the N most influential nodes (0 = all, in node order)
    #[arg(long, default_value_t = 0)]
    top: usize,

    /// Skip per-node output, print timings only
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Unweighted then weighted (default)
    All,
    /// BFS hop distances only
    Unweighted,
    /// Dijkstra weighted distances only
    Weighted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Uniform random partners, `--degree` draws per node
    Random,
    /// Single path through every node
    Path,
    /// Node 0 connected to every other node
    Star,
}

impl Shape {
    fn edges(self, node_count: u64, degree: u32, rng: &mut StdRng) -> Vec<(NodeId, NodeId)> {
        match self {
            Shape::Random => generate::random_edges(node_count, degree, rng),
            Shape::Path => generate::path_edges(node_count),
            Shape::Star => generate::star_edges(node_count),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("influence_bench=info".parse()?)
                .add_directive("influence_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    let config = if cli.parallel {
        CentralityConfig::parallel()
    } else {
        CentralityConfig::sequential()
    };
    info!(
        nodes = cli.nodes,
        degree = cli.degree,
        shape = ?cli.shape,
        seed,
        execution = %config.execution,
        "starting influence benchmark"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    run(&cli, seed, &config, &mut out)
}

fn run<W: Write>(cli: &Cli, seed: u64, config: &CentralityConfig, out: &mut W) -> Result<()> {
    // Separate streams so the weighted graph does not depend on the mode.
    let mut unweighted_rng = StdRng::seed_from_u64(seed);
    let mut weighted_rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let run_unweighted = matches!(cli.mode, Mode::All | Mode::Unweighted);
    let run_weighted = matches!(cli.mode, Mode::All | Mode::Weighted);

    if run_unweighted {
        let edges = cli.shape.edges(cli.nodes, cli.degree, &mut unweighted_rng);
        let graph = generate::build_graph(cli.nodes, &edges);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generated unweighted graph"
        );

        writeln!(out, "Testing Influence Score (Unweighted)...")?;
        report::measure(out, "Unweighted Influence", |w| {
            let scores = influence_scores(&graph, config);
            if !cli.quiet {
                report::render_scores(w, &scores, cli.top)?;
            }
            Ok(())
        })?;
    }

    if run_unweighted && run_weighted {
        writeln!(out)?;
    }

    if run_weighted {
        let edges = cli.shape.edges(cli.nodes, cli.degree, &mut weighted_rng);
        let graph = generate::build_weighted_graph(cli.nodes, &edges, &mut weighted_rng)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generated weighted graph"
        );

        writeln!(out, "Testing Influence Score (Weighted)...")?;
        report::measure(out, "Weighted Influence", |w| {
            let scores = weighted_influence_scores(&graph, config)?;
            if !cli.quiet {
                report::render_scores(w, &scores, cli.top)?;
            }
            Ok(())
        })?;
    }

    Ok(())
}
