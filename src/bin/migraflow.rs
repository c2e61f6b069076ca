//! Migraflow CLI: parse migration datasets and project them for flow diagrams.
//!
//! Usage:
//!   migraflow parse <file>
//!   migraflow sankey <file> [--year Y] [--break-cycles] [--layout]
//!   migraflow chord <file> [--year Y]
//!   migraflow snapshots <file> [--year Y] [--json]
//!   migraflow aggregate <file> --by source|target|source-target

use clap::{Parser, Subcommand};
use migraflow::adapter::{
    aggregate_by_key, break_cycles, to_chord, to_sankey, GroupBy, SankeyLayout,
};
use migraflow::ingest::parse_gexf;
use migraflow::{ingest, Dataset, FlowConfig, FlowError, FlowResult, MigrationGraph};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "migraflow",
    version,
    about = "Migration-flow ingestion and visualization adapters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV or GEXF file and print the dataset as JSON
    Parse {
        file: PathBuf,
    },
    /// Project a dataset into Sankey nodes and links
    Sankey {
        file: PathBuf,
        /// Snapshot year for GEXF input (defaults to the last year)
        #[arg(long)]
        year: Option<i64>,
        /// Keep only the heavier direction of each node pair first
        #[arg(long)]
        break_cycles: bool,
        /// Include computed node and link geometry
        #[arg(long)]
        layout: bool,
    },
    /// Project a dataset into a Chord matrix
    Chord {
        file: PathBuf,
        /// Snapshot year for GEXF input (defaults to the last year)
        #[arg(long)]
        year: Option<i64>,
    },
    /// Materialize GEXF snapshots
    Snapshots {
        file: PathBuf,
        /// Materialize a single year instead of the whole range
        #[arg(long)]
        year: Option<i64>,
        /// Print full snapshots instead of a summary table
        #[arg(long)]
        json: bool,
    },
    /// Merge edges sharing a key, summing values
    Aggregate {
        file: PathBuf,
        /// Grouping key: source, target or source-target
        #[arg(long)]
        by: GroupBy,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> FlowResult<FlowConfig> {
    match path {
        Some(path) => FlowConfig::load(path),
        None => Ok(FlowConfig::default()),
    }
}

fn print_json(value: &impl Serialize) -> FlowResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load a file as a flow graph; GEXF input is reduced to one snapshot.
fn load_flows(file: &Path, year: Option<i64>) -> FlowResult<MigrationGraph> {
    let text = std::fs::read_to_string(file)?;
    match ingest(&text)? {
        Dataset::Migration(graph) => Ok(graph),
        Dataset::Temporal(graph) => {
            let year = year.unwrap_or(graph.time_range.end);
            tracing::info!(year, "using temporal snapshot");
            Ok(graph.snapshot(year).to_migration_graph())
        }
    }
}

fn cmd_parse(file: &Path) -> FlowResult<()> {
    let text = std::fs::read_to_string(file)?;
    let dataset = ingest(&text)?;
    if let Dataset::Migration(graph) = &dataset {
        graph.validate()?;
    }
    tracing::info!(
        nodes = dataset.node_count(),
        edges = dataset.edge_count(),
        "parsed {}",
        file.display()
    );
    print_json(&dataset)
}

fn cmd_sankey(
    config: &FlowConfig,
    file: &Path,
    year: Option<i64>,
    cycles: bool,
    layout: bool,
) -> FlowResult<()> {
    let graph = load_flows(file, year)?;
    let edges = if cycles {
        break_cycles(&graph.edges)
    } else {
        graph.edges
    };
    let projection = to_sankey(&graph.nodes, &edges);
    if projection.dropped_edges > 0 {
        eprintln!(
            "Note: {} of {} edges dropped to keep the diagram bipartite",
            projection.dropped_edges,
            edges.len()
        );
    }

    if layout {
        let geometry = SankeyLayout::compute(&projection, &config.layout);
        print_json(&serde_json::json!({ "projection": projection, "layout": geometry }))
    } else {
        print_json(&projection)
    }
}

fn cmd_chord(file: &Path, year: Option<i64>) -> FlowResult<()> {
    let graph = load_flows(file, year)?;
    print_json(&to_chord(&graph.nodes, &graph.edges))
}

fn cmd_snapshots(config: &FlowConfig, file: &Path, year: Option<i64>, json: bool) -> FlowResult<()> {
    let text = std::fs::read_to_string(file)?;
    let graph = parse_gexf(&text)?;

    let snapshots = match year {
        Some(year) => vec![graph.snapshot(year)],
        None => {
            let span = graph.time_range.span();
            if span > config.max_snapshot_range {
                return Err(FlowError::RangeTooLarge {
                    span,
                    limit: config.max_snapshot_range,
                });
            }
            graph.materialize_all()
        }
    };

    if json {
        return print_json(&snapshots);
    }

    println!("{:>8}  {:>7}  {:>7}", "YEAR", "NODES", "EDGES");
    println!("{}", "-".repeat(26));
    for snapshot in &snapshots {
        println!(
            "{:>8}  {:>7}  {:>7}",
            snapshot.timestamp,
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
    }
    Ok(())
}

fn cmd_aggregate(file: &Path, by: GroupBy) -> FlowResult<()> {
    let graph = load_flows(file, None)?;
    print_json(&aggregate_by_key(&graph.edges, by))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Parse { file } => cmd_parse(&file),
        Commands::Sankey {
            file,
            year,
            break_cycles,
            layout,
        } => cmd_sankey(&config, &file, year, break_cycles, layout),
        Commands::Chord { file, year } => cmd_chord(&file, year),
        Commands::Snapshots { file, year, json } => cmd_snapshots(&config, &file, year, json),
        Commands::Aggregate { file, by } => cmd_aggregate(&file, by),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn gexf_file(start: i64, end: i64) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<gexf><graph><nodes><node id="a"><spells><spell start="{start}" end="{end}"/></spells></node></nodes></graph></gexf>"#
        )
        .unwrap();
        file
    }

    // === Scenario: a range wider than the configured limit is refused ===
    #[test]
    fn wide_range_is_refused() {
        let file = gexf_file(0, 1000);
        let err = cmd_snapshots(&FlowConfig::default(), file.path(), None, false).unwrap_err();
        assert!(matches!(
            err,
            FlowError::RangeTooLarge { span: 1001, limit: 200 }
        ));
    }

    #[test]
    fn extreme_bounds_are_refused_not_wrapped() {
        let file = gexf_file(i64::MIN, i64::MAX);
        let err = cmd_snapshots(&FlowConfig::default(), file.path(), None, false).unwrap_err();
        assert!(matches!(err, FlowError::RangeTooLarge { span: u64::MAX, .. }));
    }

    #[test]
    fn single_year_bypasses_the_limit() {
        let file = gexf_file(0, 1000);
        assert!(cmd_snapshots(&FlowConfig::default(), file.path(), Some(500), false).is_ok());
    }

    #[test]
    fn narrow_range_within_limit_succeeds() {
        let file = gexf_file(2018, 2020);
        let config = FlowConfig {
            max_snapshot_range: 3,
            ..FlowConfig::default()
        };
        assert!(cmd_snapshots(&config, file.path(), None, false).is_ok());
    }
}
