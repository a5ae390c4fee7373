//! Argument parsing and command execution for the `sngdbscan` binary.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use sngdbscan_core::{
    ClusteringResult, Metric, SamplingRate, SelfSampling, SngDbscan, SngDbscanBuilder,
    SngDbscanError,
};
use sngdbscan_providers_dense::{DenseMatrixProvider, DenseMatrixProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_SAMPLING_RATE: f64 = 1.0;
const DEFAULT_MIN_POINTS: usize = 5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sngdbscan",
    about = "Approximate density clustering with sampled neighbourhood graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a data source and print one label per point.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Fraction of candidates each point compares against, in `(0, 1]`
    /// (defaults to 1).
    #[arg(long, conflicts_with = "log_sampling_factor")]
    pub sampling_rate: Option<f64>,

    /// Use `factor * ln(n) / n` as the sampling rate instead of a fixed one.
    #[arg(long)]
    pub log_sampling_factor: Option<f64>,

    /// Neighbourhood radius.
    #[arg(long, allow_negative_numbers = true)]
    pub max_distance: f32,

    /// Sampled neighbours required for a point to be core.
    #[arg(long, default_value_t = DEFAULT_MIN_POINTS)]
    pub min_points: usize,

    /// Distance metric.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// How a point's own index is kept out of its sample.
    #[arg(long, value_enum, default_value_t = SelfSamplingArg::Exclude)]
    pub self_sampling: SelfSamplingArg,

    /// Seed for the sampling generator.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Data source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

impl RunCommand {
    fn sampling(&self) -> SamplingRate {
        match self.log_sampling_factor {
            Some(factor) => SamplingRate::Logarithmic { factor },
            None => SamplingRate::Fixed(self.sampling_rate.unwrap_or(DEFAULT_SAMPLING_RATE)),
        }
    }
}

/// Input data sources.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Cluster a Parquet file containing a `FixedSizeList<Float32, D>` column.
    Parquet(ParquetArgs),
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file containing feature vectors.
    pub path: PathBuf,

    /// Column containing `FixedSizeList<Float32, D>` rows.
    #[arg(long)]
    pub column: String,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Distance metrics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Straight-line distance.
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
    /// One minus cosine similarity.
    Cosine,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Euclidean => Self::Euclidean,
            MetricArg::Manhattan => Self::Manhattan,
            MetricArg::Cosine => Self::Cosine,
        }
    }
}

/// Self-sampling policies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelfSamplingArg {
    /// Leave each point out of its own candidate pool.
    Exclude,
    /// Sample from every point and drop self matches.
    Discard,
}

impl From<SelfSamplingArg> for SelfSampling {
    fn from(value: SelfSamplingArg) -> Self {
        match value {
            SelfSamplingArg::Exclude => Self::Exclude,
            SelfSamplingArg::Discard => Self::DiscardSelfEdges,
        }
    }
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
    /// Dense matrix ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseMatrixProviderError),
    /// Configuration or clustering failed.
    #[error(transparent)]
    Core(#[from] SngDbscanError),
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the data source that was clustered.
    pub data_source: String,
    /// Labels and counts produced by the run.
    pub result: ClusteringResult,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid, the input cannot
/// be loaded or clustering fails.
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
    fields(
        max_distance = command.max_distance,
        min_points = command.min_points,
        metric = field::Empty,
        self_sampling = field::Empty,
        seed = command.seed,
        source = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let metric = Metric::from(command.metric);
    let policy = SelfSampling::from(command.self_sampling);
    let engine = SngDbscanBuilder::new()
        .with_sampling(command.sampling())
        .with_max_distance(command.max_distance)
        .with_min_points(command.min_points)
        .with_self_sampling(policy)
        .with_distance(metric)
        .build()?;

    let span = Span::current();
    span.record("metric", field::display(metric));
    span.record("self_sampling", field::display(policy.as_str()));

    let summary = match command.source {
        RunSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            run_parquet(&engine, command.seed, args)?
        }
    };

    info!(
        data_source = summary.data_source.as_str(),
        clusters = summary.result.cluster_count(),
        noise = summary.result.noise_count(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.run_parquet",
    err,
    skip(engine, args),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_parquet(
    engine: &SngDbscan<Metric>,
    seed: u64,
    args: ParquetArgs,
) -> Result<ExecutionSummary, CliError> {
    let ParquetArgs { path, column, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("column", field::display(&column));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let file = open_input(&path)?;
    let provider = DenseMatrixProvider::try_from_parquet_reader(chosen_name, file, &column)?;
    let data_source = provider.name().to_owned();
    let points = provider.into_point_set()?;
    let result = engine.fit_predict_seeded(&points, seed)?;
    info!(
        data_source = data_source.as_str(),
        points = points.len(),
        dimension = points.dimension(),
        "parquet execution completed"
    );
    Ok(ExecutionSummary {
        data_source,
        result,
    })
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<File, CliError> {
    Span::current().record("path", field::display(path.display()));
    File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer`: a header with the data source, cluster and
/// noise counts, then one `index<TAB>label` line per point with `-1` for
/// noise.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sngdbscan_cli::cli::{ExecutionSummary, render_summary};
/// # use sngdbscan_core::ClusteringResult;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     result: ClusteringResult::try_from_labels(vec![0, -1, 0])?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\nclusters: 1\nnoise: 1\n0\t0\n1\t-1\n2\t0\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "clusters: {}", summary.result.cluster_count())?;
    writeln!(writer, "noise: {}", summary.result.noise_count())?;
    for (index, label) in summary.result.labels().iter().enumerate() {
        writeln!(writer, "{index}\t{label}")?;
    }
    Ok(())
}
