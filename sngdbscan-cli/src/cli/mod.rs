//! Command-line interface for running SNG-DBSCAN over Parquet feature
//! vectors.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, MetricArg, ParquetArgs, RunCommand, RunSource,
    SelfSamplingArg, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
