// In: src/bridge/arrow_impl.rs

//! Arrow interop for colored point clouds.
//!
//! A point cloud travels as a `RecordBatch` with six non-null `UInt8` columns,
//! `x, y, z, r, g, b`, in that order. Decoding reads columns 4 to 6 by position;
//! the names are only used when building batches.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, UInt32Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::codec::Codec;
use crate::error::CpsError;
use crate::types::{SampleRecord, SAMPLE_FIELDS};

/// Column names of a point batch, in field order.
pub const POINT_COLUMNS: [&str; SAMPLE_FIELDS] = ["x", "y", "z", "r", "g", "b"];

/// Schema of a colored point batch.
pub fn point_schema() -> SchemaRef {
    Arc::new(Schema::new(
        POINT_COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::UInt8, false))
            .collect::<Vec<_>>(),
    ))
}

/// Builds a point batch from typed records.
pub fn point_batch_from_records(records: &[SampleRecord]) -> Result<RecordBatch, CpsError> {
    let columns: Vec<ArrayRef> = (0..SAMPLE_FIELDS)
        .map(|field| {
            let values = records.iter().map(|rec| rec.fields()[field]);
            Arc::new(UInt8Array::from_iter_values(values)) as ArrayRef
        })
        .collect();
    Ok(RecordBatch::try_new(point_schema(), columns)?)
}

/// Returns column `idx` as a null-free `UInt8Array`.
fn color_column(batch: &RecordBatch, idx: usize) -> Result<&UInt8Array, CpsError> {
    let column = batch.column(idx);
    let name = batch.schema().field(idx).name().clone();
    let typed = column
        .as_any()
        .downcast_ref::<UInt8Array>()
        .ok_or_else(|| {
            CpsError::Type(format!(
                "point column {} ('{}') has type {}, expected UInt8",
                idx,
                name,
                column.data_type()
            ))
        })?;
    if typed.null_count() > 0 {
        return Err(CpsError::Type(format!(
            "point column {} ('{}') contains {} null value(s)",
            idx,
            name,
            typed.null_count()
        )));
    }
    Ok(typed)
}

/// Decodes the labels carried by a colored point batch, one per row.
pub fn decode_point_batch(codec: &Codec, batch: &RecordBatch) -> Result<UInt32Array, CpsError> {
    if batch.num_columns() != SAMPLE_FIELDS {
        return Err(CpsError::ShapeMismatch(format!(
            "point batch must have exactly {} columns, got {}",
            SAMPLE_FIELDS,
            batch.num_columns()
        )));
    }
    let red = color_column(batch, 3)?;
    let green = color_column(batch, 4)?;
    let blue = color_column(batch, 5)?;

    log::debug!("cps decode: point batch of {} rows", batch.num_rows());
    let labels = red
        .values()
        .iter()
        .zip(green.values().iter())
        .zip(blue.values().iter())
        .map(|((&r, &g), &b)| codec.decode_rgb(r, g, b))
        .collect::<Result<Vec<u32>, CpsError>>()?;
    Ok(UInt32Array::from(labels))
}
