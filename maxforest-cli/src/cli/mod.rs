//! Command-line interface for running maxforest over JSON graph snapshots.
//!
//! The `run` command loads a snapshot, computes the maximum spanning forest,
//! and renders trees, node ranks, and per-edge tree flags as text or JSON.

mod commands;
mod document;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, OutputFormat, RunCommand, StrategyArg,
    render_summary, run_cli,
};
pub use document::{EdgeDocument, GraphDocument, NodeDocument};
