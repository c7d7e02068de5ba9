use std::path::Path;

use log::info;
use serde::Serialize;

use crate::data::LongTable;
use crate::error::{Result, WrangleError};

#[derive(Serialize)]
struct CsvRow<'a> {
    country: &'a str,
    year: i32,
    value: Option<f64>,
}

/// Write a tidy table as `country,year,value` CSV. Missing values become empty fields.
pub fn write_long_csv<W: std::io::Write>(table: &LongTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for obs in &table.rows {
        writer.serialize(CsvRow {
            country: &obs.country,
            year: obs.year,
            value: (!obs.value.is_nan()).then_some(obs.value),
        })?;
    }
    writer
        .flush()
        .map_err(|e| WrangleError::io(Path::new("<csv output>"), e))?;
    Ok(())
}

/// [`write_long_csv`] to a file on disk.
pub fn save_long_csv(table: &LongTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| WrangleError::io(path, e))?;
    write_long_csv(table, file)?;
    info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Observation;

    #[test]
    fn writes_header_and_blank_for_missing() {
        let table = LongTable {
            rows: vec![
                Observation { country: "Germany".into(), year: 2021, value: 6626.0 },
                Observation { country: "Germany".into(), year: 2020, value: f64::NAN },
            ],
        };
        let mut buf = Vec::new();
        write_long_csv(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "country,year,value\nGermany,2021,6626.0\nGermany,2020,\n");
    }
}
