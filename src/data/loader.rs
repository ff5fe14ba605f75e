use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{
    LaunchDataset, LaunchRecord, COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row containing at least the four required columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Columns other than the required four are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    LaunchDataset::from_records(records).with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DatasetError::MissingColumn(name))
    };
    let site_idx = column(COL_LAUNCH_SITE)?;
    let payload_idx = column(COL_PAYLOAD_MASS)?;
    let booster_idx = column(COL_BOOSTER_CATEGORY)?;
    let class_idx = column(COL_CLASS)?;

    let mut records = Vec::new();

    // Diagnostics count data rows from 1.
    for (row_no, result) in (1..).zip(reader.records()) {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let payload = parse_number(cell(payload_idx), row_no, COL_PAYLOAD_MASS)?;
        let class = parse_class(cell(class_idx), row_no)?;

        records.push(LaunchRecord::from_cells(
            row_no,
            cell(site_idx),
            payload,
            cell(booster_idx),
            class,
        )?);
    }

    Ok(records)
}

fn parse_number(s: &str, row: usize, column: &'static str) -> Result<f64, DatasetError> {
    let s = s.trim();
    s.parse::<f64>()
        .map_err(|_| DatasetError::invalid(row, column, format!("'{s}' is not a number")))
}

/// Like [`parse_number`], but `class` may also be written as a boolean.
fn parse_class(s: &str, row: usize) -> Result<f64, DatasetError> {
    match s.trim() {
        "true" | "True" => Ok(1.0),
        "false" | "False" => Ok(0.0),
        other => parse_number(other, row, COL_CLASS),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in (1..).zip(rows) {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let site = json_string(obj, COL_LAUNCH_SITE, i)?;
        let payload = json_number(obj, COL_PAYLOAD_MASS, i)?;
        let booster = json_string(obj, COL_BOOSTER_CATEGORY, i)?;
        let class = json_class(obj, i)?;

        records.push(LaunchRecord::from_cells(i, site, payload, booster, class)?);
    }

    Ok(records)
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue, DatasetError> {
    obj.get(column).ok_or(DatasetError::MissingColumn(column))
}

fn json_string<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
    row: usize,
) -> Result<&'a str, DatasetError> {
    json_field(obj, column)?
        .as_str()
        .ok_or_else(|| DatasetError::invalid(row, column, "expected a string"))
}

fn json_number(
    obj: &Map<String, JsonValue>,
    column: &'static str,
    row: usize,
) -> Result<f64, DatasetError> {
    match json_field(obj, column)? {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| DatasetError::invalid(row, column, format!("{n} is out of range"))),
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(DatasetError::invalid(
            row,
            column,
            format!("expected a number, got {other}"),
        )),
    }
}

fn json_class(obj: &Map<String, JsonValue>, row: usize) -> Result<f64, DatasetError> {
    match json_field(obj, COL_CLASS)? {
        JsonValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        JsonValue::String(s) => parse_class(s, row),
        _ => json_number(obj, COL_CLASS, row),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64, Int32, Float64, Float32 or Boolean
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| DatasetError::MissingColumn(name))
        };
        let site_col = column(COL_LAUNCH_SITE)?;
        let payload_col = column(COL_PAYLOAD_MASS)?;
        let booster_col = column(COL_BOOSTER_CATEGORY)?;
        let class_col = column(COL_CLASS)?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i + 1;
            let site = string_cell(site_col, i, row, COL_LAUNCH_SITE)?;
            let payload = number_cell(payload_col, i, row, COL_PAYLOAD_MASS)?;
            let booster = string_cell(booster_col, i, row, COL_BOOSTER_CATEGORY)?;
            let class = class_cell(class_col, i, row)?;

            records.push(LaunchRecord::from_cells(row, site, payload, booster, class)?);
        }

        row_offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Read a string cell from a Utf8 or LargeUtf8 column.
fn string_cell<'a>(
    col: &'a ArrayRef,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<&'a str, DatasetError> {
    if col.is_null(i) {
        return Err(DatasetError::invalid(row, column, "missing value"));
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(i)),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(i)),
        other => Err(DatasetError::invalid(
            row,
            column,
            format!("expected a string column, got {other:?}"),
        )),
    }
}

/// Read a numeric cell, widening integer and float32 columns to `f64`.
fn number_cell(
    col: &ArrayRef,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, DatasetError> {
    if col.is_null(i) {
        return Err(DatasetError::invalid(row, column, "missing value"));
    }
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(i)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(i) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(i) as f64),
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(i) as f64),
        other => Err(DatasetError::invalid(
            row,
            column,
            format!("expected a numeric column, got {other:?}"),
        )),
    }
}

/// Read the outcome cell; boolean columns are accepted here only.
fn class_cell(col: &ArrayRef, i: usize, row: usize) -> Result<f64, DatasetError> {
    match col.data_type() {
        DataType::Boolean if !col.is_null(i) => {
            Ok(if col.as_boolean().value(i) { 1.0 } else { 0.0 })
        }
        _ => number_cell(col, i, row, COL_CLASS),
    }
}
