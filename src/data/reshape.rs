use std::path::PathBuf;

use chrono::{DateTime, Datelike, NaiveDate};
use log::info;

use super::filter::{filter_categories, select_columns};
use super::loader::{load_table, WORLD_BANK_SKIP_ROWS};
use super::model::{Cell, LongTable, Observation, SourceTable};
use crate::error::{Result, WrangleError};

/// Default row-identifying column in World Bank files.
pub const COUNTRY_COLUMN: &str = "Country Name";

/// Extract the calendar year from a date-like column label.
///
/// Plain `2015` is the common case; `2015-06`, `2015-06-30`, `2015/06/30` and
/// RFC 3339 timestamps are accepted as well.
pub fn parse_year(label: &str) -> Result<i32> {
    let s = label.trim();
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse()
            .map_err(|_| WrangleError::InvalidYear(label.to_string()));
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.year());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Ok(d.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.year());
    }
    Err(WrangleError::InvalidYear(label.to_string()))
}

/// Unpivot `value_columns` into (country, year, value) rows.
///
/// `id_column` is held fixed. Value columns form the outer loop, so all
/// countries for the first year come first.
pub fn melt<S: AsRef<str>>(
    table: &SourceTable,
    id_column: &str,
    value_columns: &[S],
) -> Result<LongTable> {
    let id_idx = table.column_index(id_column)?;
    let targets = value_columns
        .iter()
        .map(|name| -> Result<(&str, usize, i32)> {
            let name = name.as_ref();
            Ok((name, table.column_index(name)?, parse_year(name)?))
        })
        .collect::<Result<Vec<(&str, usize, i32)>>>()?;

    let mut rows = Vec::with_capacity(targets.len() * table.len());
    for (column, idx, year) in targets {
        for row in &table.rows {
            let country = row[id_idx].to_string();
            let value = match &row[idx] {
                Cell::Number(v) => *v,
                Cell::Null => f64::NAN,
                Cell::Text(s) => {
                    return Err(WrangleError::NonNumericValue {
                        country,
                        column: column.to_string(),
                        value: s.clone(),
                    })
                }
            };
            rows.push(Observation {
                country,
                year,
                value,
            });
        }
    }

    Ok(LongTable { rows })
}

// ---------------------------------------------------------------------------
// Full reshape utility
// ---------------------------------------------------------------------------

/// Parameters for one [`clean_data`] call.
#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub dataset: PathBuf,
    /// Columns to retain; empty means `category_column` plus `value_columns`.
    pub keep_columns: Vec<String>,
    /// Year columns to unpivot.
    pub value_columns: Vec<String>,
    pub countries: Vec<String>,
    pub category_column: String,
    pub skip_rows: usize,
}

impl CleanRequest {
    /// A request against a World Bank CSV with the default layout.
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        CleanRequest {
            dataset: dataset.into(),
            keep_columns: Vec::new(),
            value_columns: Vec::new(),
            countries: Vec::new(),
            category_column: COUNTRY_COLUMN.to_string(),
            skip_rows: WORLD_BANK_SKIP_ROWS,
        }
    }

    /// Year columns to unpivot.
    pub fn years<I, S>(mut self, years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_columns = years.into_iter().map(Into::into).collect();
        self
    }

    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = column.into();
        self
    }

    pub fn skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// The columns actually selected from the source table.
    pub fn selected_columns(&self) -> Vec<String> {
        if !self.keep_columns.is_empty() {
            return self.keep_columns.clone();
        }
        std::iter::once(self.category_column.clone())
            .chain(self.value_columns.iter().cloned())
            .collect()
    }
}

/// Load, select, filter and melt a wide indicator file.
///
/// Returns the tidy table in memory; nothing is written to disk
/// (see [`crate::storage::write_long_csv`] for that).
pub fn clean_data(request: &CleanRequest) -> Result<LongTable> {
    let table = load_table(&request.dataset, request.skip_rows)?;
    let table = select_columns(&table, &request.selected_columns())?;
    let table = filter_categories(&table, &request.category_column, &request.countries)?;
    let long = melt(&table, &request.category_column, &request.value_columns)?;

    info!(
        "{}: {} countries x {} years -> {} rows",
        request.dataset.display(),
        table.len(),
        request.value_columns.len(),
        long.len()
    );
    Ok(long)
}
