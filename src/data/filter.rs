use std::collections::BTreeSet;

use log::{debug, warn};

use super::model::SourceTable;
use crate::error::Result;

/// Keep only `keep` columns, in the requested order.
///
/// Fails with `MissingColumn` on the first requested column the table lacks.
pub fn select_columns<S: AsRef<str>>(table: &SourceTable, keep: &[S]) -> Result<SourceTable> {
    let indices = keep
        .iter()
        .map(|name| table.column_index(name.as_ref()))
        .collect::<Result<Vec<usize>>>()?;

    let columns = indices.iter().map(|&i| table.columns[i].clone()).collect();
    let rows = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();

    Ok(SourceTable { columns, rows })
}

/// Keep rows whose `column` value is one of `categories`.
///
/// Surviving rows follow source order, not request order. Categories the
/// table does not contain match nothing and are logged.
pub fn filter_categories<S: AsRef<str>>(
    table: &SourceTable,
    column: &str,
    categories: &[S],
) -> Result<SourceTable> {
    let idx = table.column_index(column)?;
    let wanted: BTreeSet<&str> = categories.iter().map(|c| c.as_ref()).collect();

    let mut found: BTreeSet<String> = BTreeSet::new();
    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|row| match row[idx].label() {
            Some(label) if wanted.contains(label.as_str()) => {
                found.insert(label);
                true
            }
            _ => false,
        })
        .cloned()
        .collect();

    for missing in wanted.iter().filter(|c| !found.contains(**c)) {
        warn!("category '{missing}' not present in column '{column}'");
    }
    debug!("kept {} of {} rows", rows.len(), table.len());

    Ok(SourceTable {
        columns: table.columns.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;
    use crate::error::WrangleError;

    fn table() -> SourceTable {
        SourceTable::new(
            vec!["Country Name".into(), "Country Code".into(), "2020".into()],
            vec![
                vec![Cell::Text("Japan".into()), Cell::Text("JPN".into()), Cell::Number(1.0)],
                vec![Cell::Text("China".into()), Cell::Text("CHN".into()), Cell::Number(2.0)],
                vec![Cell::Text("India".into()), Cell::Text("IND".into()), Cell::Null],
            ],
        )
    }

    #[test]
    fn select_reorders_and_drops_columns() {
        let t = select_columns(&table(), &["2020", "Country Name"]).unwrap();
        assert_eq!(t.columns, vec!["2020", "Country Name"]);
        assert_eq!(t.rows[1], vec![Cell::Number(2.0), Cell::Text("China".into())]);
    }

    #[test]
    fn select_fails_on_absent_column() {
        let err = select_columns(&table(), &["Country Name", "1999"]).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(c) if c == "1999"));
    }

    #[test]
    fn filter_keeps_source_order() {
        let t = filter_categories(&table(), "Country Name", &["India", "Japan"]).unwrap();
        let names: Vec<_> = t.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(names, vec!["Japan", "India"]);
    }

    #[test]
    fn filter_with_unknown_category_is_empty() {
        let t = filter_categories(&table(), "Country Name", &["Jappan"]).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn filter_matches_numeric_labels() {
        let t = SourceTable::new(
            vec!["Cohort".into(), "2020".into()],
            vec![
                vec![Cell::guess("1990"), Cell::Number(1.0)],
                vec![Cell::guess("2000"), Cell::Number(2.0)],
            ],
        );
        let kept = filter_categories(&t, "Cohort", &["1990"]).unwrap();
        assert_eq!(kept.rows, vec![vec![Cell::Number(1990.0), Cell::Number(1.0)]]);
    }

    #[test]
    fn filter_fails_without_category_column() {
        let err = filter_categories(&table(), "Country", &["Japan"]).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn(_)));
    }
}
