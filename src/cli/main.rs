#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use csv::Writer;
use flownet::{compute_max_flow, compute_min_cut, Algorithm, Config, EdgePolicy, FlowNetwork};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

/// Compute a maximum flow (and optionally a minimum cut) over a CSV edge list.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// CSV file with `tail,head,capacity` rows
    input: PathBuf,

    #[arg(long)]
    source: usize,

    #[arg(long)]
    sink: usize,

    /// Number of vertices, defaults to the largest id in use plus one
    #[arg(long)]
    vertices: Option<usize>,

    #[arg(long, value_enum, default_value_t = AlgorithmArg::EdmondsKarp)]
    algorithm: AlgorithmArg,

    /// Give up after this many augmentations or push/relabel operations
    #[arg(long)]
    iteration_limit: Option<usize>,

    /// Merge parallel edges instead of rejecting them
    #[arg(long)]
    merge_parallel: bool,

    /// Also print the edges of a minimum cut
    #[arg(long)]
    min_cut: bool,

    /// Write the flow assignment to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AlgorithmArg {
    EdmondsKarp,
    PushRelabel,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::EdmondsKarp => Algorithm::EdmondsKarp,
            AlgorithmArg::PushRelabel => Algorithm::PushRelabel,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct RawEdge {
    tail: usize,
    head: usize,
    capacity: i64,
}

#[derive(Clone, Debug, Serialize)]
struct FlowRecord {
    tail: usize,
    head: usize,
    capacity: i64,
    flow: i64,
}

// Read the edge list from a CSV file with a header row
fn read_edges_csv(filepath: &Path) -> Result<Vec<RawEdge>, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(filepath)?;
    let rows = rdr.deserialize().collect::<Result<Vec<RawEdge>, _>>()?;
    Ok(rows)
}

// Write the flow assignment
fn write_csv(records: &[FlowRecord], filepath: &Path) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filepath)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn lib_error(e: flownet::Error) -> Box<dyn Error> {
    e.to_string().into()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    TermLogger::init(
        cli.log_level.into(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| e.to_string())?;

    let edges = read_edges_csv(&cli.input)?;
    log::info!("read {} edges from {}", edges.len(), cli.input.display());

    let vertices = cli.vertices.unwrap_or_else(|| {
        edges
            .iter()
            .flat_map(|e| [e.tail, e.head])
            .chain([cli.source, cli.sink])
            .max()
            .map_or(0, |max| max + 1)
    });
    let policy = if cli.merge_parallel {
        EdgePolicy::Merge
    } else {
        EdgePolicy::Reject
    };

    let mut network = FlowNetwork::new(vertices, cli.source, cli.sink)
        .map_err(lib_error)?
        .with_policy(policy);
    for e in &edges {
        network
            .add_edge(e.tail, e.head, e.capacity)
            .map_err(lib_error)?;
    }

    let mut config = Config::new(cli.algorithm.into());
    if let Some(limit) = cli.iteration_limit {
        config = config.with_iteration_limit(limit);
    }

    let (value, residual) = compute_max_flow(&network, &config).map_err(lib_error)?;
    println!("max flow: {value}");

    if cli.min_cut {
        let cut = compute_min_cut(&network, &residual).map_err(lib_error)?;
        println!("min cut:");
        for (u, v) in cut {
            println!("  {u} -> {v} ({})", network.capacity(u, v));
        }
    }

    if let Some(output) = &cli.output {
        let records: Vec<_> = residual
            .edge_flows()
            .into_iter()
            .map(|(tail, head, flow)| FlowRecord {
                tail,
                head,
                capacity: network.capacity(tail, head),
                flow,
            })
            .collect();
        write_csv(&records, output)?;
        log::info!("wrote {} flow records to {}", records.len(), output.display());
    }

    Ok(())
}
