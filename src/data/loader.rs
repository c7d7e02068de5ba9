use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Cell, SourceTable};
use crate::error::{Result, WrangleError};

/// Number of metadata lines above the header in World Bank indicator CSVs.
pub const WORLD_BANK_SKIP_ROWS: usize = 4;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wide indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – `skip_rows` metadata lines, then a header row
/// * `.parquet` – one column per field; `skip_rows` is ignored
pub fn load_table(path: &Path, skip_rows: usize) -> Result<SourceTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).map_err(|e| WrangleError::io(path, e))?;
            load_csv(file, skip_rows)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(WrangleError::UnsupportedFormat(other.to_string())),
    };

    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// World Bank layout:
///
/// ```text
/// "Data Source","World Development Indicators",
///
/// "Last Updated Date","2023-05-10",
///
/// "Country Name","Country Code","Indicator Name","Indicator Code","1960",...,"2022",
/// "Aruba","ABW","Current health expenditure ...","SH.XPD.CHEX.PC.CD","",...,
/// ```
///
/// The first `skip_rows` raw lines are dropped before the CSV parser sees the
/// input. Rows end with a trailing comma, so the parser runs in flexible mode
/// and the empty trailing header becomes `Unnamed: <idx>`.
pub fn load_csv<R: Read>(input: R, skip_rows: usize) -> Result<SourceTable> {
    let mut reader = BufReader::new(input);
    let mut discard = String::new();
    for _ in 0..skip_rows {
        discard.clear();
        let n = reader
            .read_line(&mut discard)
            .map_err(|e| WrangleError::io(Path::new("<csv input>"), e))?;
        if n == 0 {
            break;
        }
    }
    debug!("skipped {skip_rows} metadata lines");

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::guess).collect());
    }

    Ok(SourceTable::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding a wide indicator table.
///
/// Text columns become `Cell::Text`, numeric columns `Cell::Number`, nulls
/// and NaN `Cell::Null`.  Works with files written by both **Pandas**
/// (`df.to_parquet()`, including `category` columns) and **Polars**
/// (`df.write_parquet()`, including string views).
fn load_parquet(path: &Path) -> Result<SourceTable> {
    let file = std::fs::File::open(path).map_err(|e| WrangleError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        append_batch_rows(&batch_result?, &mut rows)?;
    }

    Ok(SourceTable::new(columns, rows))
}

// -- Parquet / Arrow helpers --

/// The type a column is read as: `Utf8` for text, `Float64` for numbers.
fn cell_type(data_type: &DataType) -> Option<DataType> {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Some(DataType::Utf8),
        DataType::Dictionary(_, values) => cell_type(values),
        DataType::Null => Some(DataType::Float64),
        other if other.is_numeric() => Some(DataType::Float64),
        _ => None,
    }
}

/// Cast every column of `batch` to `Utf8` or `Float64`, then push its rows.
fn append_batch_rows(batch: &RecordBatch, rows: &mut Vec<Vec<Cell>>) -> Result<()> {
    let schema = batch.schema();
    let columns = schema
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, col)| -> Result<ArrayRef> {
            let target = cell_type(col.data_type()).ok_or_else(|| {
                WrangleError::UnsupportedColumnType {
                    column: field.name().clone(),
                    data_type: col.data_type().to_string(),
                }
            })?;
            if col.data_type() == &target {
                Ok(Arc::clone(col))
            } else {
                Ok(cast(col, &target)?)
            }
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    for row in 0..batch.num_rows() {
        rows.push(columns.iter().map(|col| extract_cell(col, row)).collect());
    }
    Ok(())
}

/// Extract a single cell from a `Utf8` or `Float64` column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        _ => {
            let v = col.as_primitive::<Float64Type>().value(row);
            if v.is_nan() {
                Cell::Null
            } else {
                Cell::Number(v)
            }
        }
    }
}
