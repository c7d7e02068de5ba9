use std::fmt;

use serde::Serialize;

use crate::error::{Result, WrangleError};

const NA_MARKERS: [&str; 7] = ["NA", "N/A", "#N/A", "NaN", "nan", "null", "NULL"];

// ---------------------------------------------------------------------------
// Cell – a single value in the wide source table
// ---------------------------------------------------------------------------

/// A dynamically-typed source cell, mirroring what a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    /// Infer the cell type from a raw CSV field.
    ///
    /// Empty fields and the usual missing-value markers are `Null`; only
    /// finite numbers become `Number`, so `inf` stays text.
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || NA_MARKERS.contains(&s) {
            return Cell::Null;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(s.to_string()),
        }
    }

    /// The cell as a category label. Numeric labels such as `1990` match
    /// by their printed form.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(v) => Some(v.to_string()),
            Cell::Null => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceTable – wide format, one row per country, one column per year
// ---------------------------------------------------------------------------

/// A rectangular table as read from disk. Every row has `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SourceTable {
    /// Build a table, padding short rows with `Cell::Null` and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        SourceTable { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| WrangleError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LongTable – tidy (country, year, value) triples
// ---------------------------------------------------------------------------

/// One long-format row.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    /// NaN when the source cell was empty.
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LongTable {
    pub rows: Vec<Observation>,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Latest year first. Stable, so rows of the same year keep their order.
    pub fn sort_by_year_desc(&mut self) {
        self.rows.sort_by(|a, b| b.year.cmp(&a.year));
    }

    /// Unique countries in order of first appearance.
    pub fn countries(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for obs in &self.rows {
            if !seen.iter().any(|c| c == &obs.country) {
                seen.push(obs.country.clone());
            }
        }
        seen
    }

    /// x (years) and y (values) for a single country, in table order.
    pub fn series(&self, country: &str) -> (Vec<i32>, Vec<f64>) {
        self.rows
            .iter()
            .filter(|obs| obs.country == country)
            .map(|obs| (obs.year, obs.value))
            .unzip()
    }
}
