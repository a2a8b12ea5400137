//! Command implementations and argument parsing for the maxforest CLI.

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use maxforest_core::{
    DEFAULT_PARALLEL_SORT_THRESHOLD, ExecutionStrategy, ForestError, ForestResult, GraphSnapshot,
    MaxForestBuilder, NonFiniteWeightPolicy,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::document::{ForestReport, GraphDocument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "maxforest",
    about = "Compute maximum-weight spanning forests with ranked roots."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute the forest for a JSON graph snapshot.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to a JSON document with `nodes` and `edges` arrays.
    pub path: PathBuf,

    /// How the edge list is sorted.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Edge count at which `auto` switches to the parallel sort.
    #[arg(
        long = "parallel-threshold",
        default_value_t = DEFAULT_PARALLEL_SORT_THRESHOLD,
        value_parser = clap::value_parser!(usize),
    )]
    pub parallel_threshold: usize,

    /// Fail on absent or non-finite weights instead of treating them as zero.
    #[arg(long = "reject-non-finite")]
    pub reject_non_finite: bool,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execution strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel above the threshold when available.
    Auto,
    /// Always sequential.
    Sequential,
    /// Always parallel.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Rendering used by [`render_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Line-oriented, human-readable text.
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input was not a valid graph document.
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Some edges carried an `index` and others did not.
    #[error("`{path}` mixes indexed and unindexed edges")]
    MixedEdgeIndices {
        /// Path of the offending document.
        path: PathBuf,
    },
    /// Core computation failed.
    #[error(transparent)]
    Core(#[from] ForestError),
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name derived from the input file.
    pub data_source: String,
    /// Rendering requested on the command line.
    pub format: OutputFormat,
    /// Snapshot that was loaded.
    pub graph: GraphSnapshot<String>,
    /// Forest computed from [`Self::graph`].
    pub result: ForestResult<String>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the snapshot or computing the forest
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use maxforest_cli::cli::{Cli, Command, OutputFormat, RunCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"nodes": [{"id": "A"}, {"id": "B"}], "edges": [{"source": "A", "target": "B", "weight": 1}]}"#,
/// )?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         strategy: StrategyArg::Sequential,
///         parallel_threshold: 4096,
///         reject_non_finite: false,
///         format: OutputFormat::Text,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.tree_count(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = %command.path.display(), strategy = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let strategy = ExecutionStrategy::from(command.strategy);
    Span::current().record("strategy", field::display(strategy.as_str()));
    let policy = if command.reject_non_finite {
        NonFiniteWeightPolicy::Reject
    } else {
        NonFiniteWeightPolicy::SubstituteZero
    };
    let forest = MaxForestBuilder::new()
        .with_execution_strategy(strategy)
        .with_parallel_sort_threshold(command.parallel_threshold)
        .with_non_finite_weights(policy)
        .build()?;

    let graph = load_snapshot(&command.path)?;
    let result = forest.compute(&graph)?;
    let data_source = derive_data_source_name(&command.path);

    info!(
        data_source = data_source.as_str(),
        trees = result.tree_count(),
        warnings = result.warnings().len(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source,
        format: command.format,
        graph,
        result,
    })
}

#[instrument(
    name = "cli.load_snapshot",
    err,
    fields(nodes = field::Empty, edges = field::Empty),
)]
pub(super) fn load_snapshot(path: &Path) -> Result<GraphSnapshot<String>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: GraphDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let graph = document
        .into_snapshot()
        .ok_or_else(|| CliError::MixedEdgeIndices {
            path: path.to_path_buf(),
        })?;

    let span = Span::current();
    span.record("nodes", graph.node_count());
    span.record("edges", graph.edge_count());
    Ok(graph)
}

pub(super) fn derive_data_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in the format it was requested in.
///
/// Text output starts with a header, then lists one `tree` line per tree, one
/// `node` line per node, one `edge` line per edge with its `isTreeEdge` flag,
/// and one `warning` line per warning.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = ForestReport::new(&summary.data_source, &summary.graph, &summary.result);
    match summary.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)
        }
        OutputFormat::Text => render_text(&report, writer),
    }
}

fn render_text(report: &ForestReport, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "source: {}", report.source)?;
    writeln!(writer, "trees: {}", report.tree_count)?;
    writeln!(writer, "selected edges: {}", report.selected_edge_count)?;
    writeln!(writer, "total weight: {}", report.total_weight)?;
    writeln!(writer, "warnings: {}", report.warnings.len())?;
    for tree in &report.trees {
        writeln!(
            writer,
            "tree {}\troot={}\tnodes={}\tedges={}\theight={}\tweight={}",
            tree.id, tree.root, tree.node_count, tree.edge_count, tree.height, tree.weight
        )?;
    }
    for node in &report.nodes {
        writeln!(
            writer,
            "node {}\ttree={}\trank={}",
            node.id,
            display_or_dash(node.tree),
            display_or_dash(node.rank)
        )?;
    }
    for edge in &report.edges {
        writeln!(
            writer,
            "edge {}\t{}-{}\tweight={}\tisTreeEdge={}",
            edge.index,
            edge.source,
            edge.target,
            display_or_dash(edge.weight),
            edge.is_tree_edge
        )?;
    }
    for warning in &report.warnings {
        writeln!(writer, "warning {}\t{}", warning.code, warning.message)?;
    }
    Ok(())
}

fn display_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}
