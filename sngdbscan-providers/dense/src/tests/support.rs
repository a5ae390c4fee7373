use std::convert::TryFrom;
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;

pub(crate) fn build_array(rows: &[[f32; 3]]) -> FixedSizeListArray {
    let rows = rows.iter().map(|row| row.to_vec()).collect::<Vec<_>>();
    build_list_array(&rows, 3, false)
}

pub(crate) fn build_list_array(
    rows: &[Vec<f32>],
    dimension: usize,
    child_nullable: bool,
) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float32Array::from_iter_values(rows.iter().flatten().copied());
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, child_nullable)),
        i32::try_from(dimension).expect("dimension fits in i32"),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn feature_field(dimension: usize, child_nullable: bool, list_nullable: bool) -> Field {
    Field::new(
        "features",
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float32, child_nullable)),
            i32::try_from(dimension).expect("dimension fits in i32"),
        ),
        list_nullable,
    )
}

pub(crate) fn feature_batch(rows: &[Vec<f32>], dimension: usize) -> RecordBatch {
    let array = build_list_array(rows, dimension, false);
    let field = feature_field(dimension, false, false);
    RecordBatch::try_new(
        Arc::new(Schema::new(vec![field])),
        vec![Arc::new(array) as ArrayRef],
    )
    .expect("batch")
}

pub(crate) fn write_parquet(array: FixedSizeListArray) -> Bytes {
    write_parquet_with_field(feature_field(3, false, false), Arc::new(array))
}

pub(crate) fn write_parquet_with_field(field: Field, array: ArrayRef) -> Bytes {
    let schema = Arc::new(Schema::new(vec![field]));
    let batch = RecordBatch::try_new(schema.clone(), vec![array]).expect("batch");
    write_batches(schema, &[batch])
}

pub(crate) fn write_batches(schema: Arc<Schema>, batches: &[RecordBatch]) -> Bytes {
    let mut buffer = Vec::new();
    {
        let mut writer = ArrowWriter::try_new(&mut buffer, schema, None).expect("writer");
        for batch in batches {
            writer.write(batch).expect("write");
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}
