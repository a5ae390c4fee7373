//! Fixtures shared by the CLI unit tests.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

use super::commands::run_command;
use super::{
    Cli, CliError, Command, MetricArg, ParquetArgs, RunCommand, RunSource, SelfSamplingArg,
    run_cli,
};

/// Two tight triangles and one far outlier.
pub(super) const POINTS: [[f32; 2]; 7] = [
    [0.0, 0.0],
    [0.1, 0.0],
    [0.0, 0.1],
    [5.0, 5.0],
    [5.1, 5.0],
    [5.0, 5.1],
    [20.0, 20.0],
];

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
    rows: &[[f32; 2]],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join(name);
    let item = Arc::new(Field::new("item", DataType::Float32, false));
    let schema = Arc::new(Schema::new(vec![Field::new(
        "features",
        DataType::FixedSizeList(item.clone(), 2),
        false,
    )]));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    let list = FixedSizeListArray::new(item, 2, Arc::new(values) as ArrayRef, None);
    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(list) as ArrayRef])?;
    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}

/// A `run` command over `path` with settings that separate [`POINTS`].
pub(super) fn parquet_command(path: PathBuf, column: &str) -> RunCommand {
    RunCommand {
        sampling_rate: None,
        log_sampling_factor: None,
        max_distance: 0.5,
        min_points: 2,
        metric: MetricArg::Euclidean,
        self_sampling: SelfSamplingArg::Exclude,
        seed: 0,
        source: RunSource::Parquet(ParquetArgs {
            path,
            column: column.to_owned(),
            name: None,
        }),
    }
}

pub(super) fn run_cli_expecting_error(command: RunCommand, panic_msg: &str) -> CliError {
    let cli = Cli {
        command: Command::Run(command),
    };
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_command_expecting_error(command: RunCommand, panic_msg: &str) -> CliError {
    match run_command(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
