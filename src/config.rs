use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::chart::{ChartConfig, Ticks, TraceKind};
use crate::data::loader::WORLD_BANK_SKIP_ROWS;
use crate::data::reshape::COUNTRY_COLUMN;
use crate::error::{Result, WrangleError};

const HEALTH_EXPENDITURE: &str = "API_SH.XPD.CHEX.PC.CD_DS2_en_csv_v2_2397.csv";
const POPULATION_65_UP: &str = "API_SP.POP.65UP.TO.ZS_DS2_en_csv_v2_2339.csv";

const TOP_ECONOMIES: [&str; 10] = [
    "United States",
    "China",
    "Japan",
    "Germany",
    "United Kingdom",
    "India",
    "France",
    "Brazil",
    "Italy",
    "Canada",
];
const DACH: [&str; 3] = ["Germany", "Austria", "Switzerland"];

/// Dashboard settings shared by every chart, plus the charts themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory the chart `dataset` paths are resolved against.
    pub data_dir: PathBuf,
    /// Metadata lines above the CSV header.
    pub skip_rows: usize,
    pub category_column: String,
    pub charts: Vec<ChartConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            skip_rows: WORLD_BANK_SKIP_ROWS,
            category_column: COUNTRY_COLUMN.to_string(),
            charts: default_charts(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config; absent fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| WrangleError::io(path, e))?;
        let config: DashboardConfig = serde_json::from_str(&text)?;
        debug!("loaded {} chart definitions from {}", config.charts.len(), path.display());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.charts.is_empty() {
            return Err(WrangleError::InvalidConfig("no charts configured".into()));
        }
        for chart in &self.charts {
            if chart.value_columns.is_empty() {
                return Err(WrangleError::InvalidConfig(format!(
                    "chart '{}' has no value columns",
                    chart.title
                )));
            }
            if chart.keep_columns.is_empty() {
                continue;
            }
            if let Some(col) = chart
                .value_columns
                .iter()
                .find(|c| !chart.keep_columns.contains(c))
            {
                return Err(WrangleError::InvalidConfig(format!(
                    "chart '{}' unpivots '{col}' but does not keep it",
                    chart.title
                )));
            }
        }
        Ok(())
    }
}

fn years(from: i32, to: i32) -> Vec<String> {
    (from..=to).map(|y| y.to_string()).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// The standard four charts: health expenditure for the top economies,
/// Germany alone, the DACH region, and DACH population aged 65+.
pub fn default_charts() -> Vec<ChartConfig> {
    let health = |countries: &[&str], kind: TraceKind, title: &str, x_ticks: Option<Ticks>| ChartConfig {
        dataset: PathBuf::from(HEALTH_EXPENDITURE),
        keep_columns: Vec::new(),
        value_columns: years(2015, 2021),
        countries: names(countries),
        kind,
        title: title.to_string(),
        x_title: "Year".to_string(),
        y_title: "US-Dollar($)".to_string(),
        x_ticks,
    };

    vec![
        health(
            &TOP_ECONOMIES,
            TraceKind::Line,
            "Current health expenditure per capita (current US$)",
            Some(Ticks { tick0: 2015, dtick: 1 }),
        ),
        health(
            &["Germany"],
            TraceKind::Bar,
            "GERMANY - Current health expenditure per capita (current US$)",
            None,
        ),
        health(
            &DACH,
            TraceKind::Line,
            "DACH Region - health expenditure comparison",
            None,
        ),
        ChartConfig {
            dataset: PathBuf::from(POPULATION_65_UP),
            keep_columns: Vec::new(),
            value_columns: years(2015, 2022),
            countries: names(&DACH),
            kind: TraceKind::Markers,
            title: "DACH Region - population above age 65 (%)".to_string(),
            x_title: "Year".to_string(),
            y_title: "%".to_string(),
            x_ticks: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dashboard_has_four_charts() {
        let config = DashboardConfig::default();
        config.validate().unwrap();
        let kinds: Vec<TraceKind> = config.charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![TraceKind::Line, TraceKind::Bar, TraceKind::Line, TraceKind::Markers]
        );
        assert_eq!(config.charts[0].countries.len(), 10);
        assert_eq!(config.charts[0].value_columns.len(), 7);
        assert_eq!(config.charts[3].value_columns.last().map(String::as_str), Some("2022"));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"data_dir": "/srv/wb"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/wb"));
        assert_eq!(config.skip_rows, 4);
        assert_eq!(config.charts.len(), 4);
    }

    #[test]
    fn chart_from_json() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{"charts": [{
                "dataset": "pop.csv",
                "value_columns": ["2020"],
                "countries": ["Japan"],
                "kind": "markers",
                "title": "Japan",
                "y_title": "%"
            }]}"#,
        )
        .unwrap();
        let chart = &config.charts[0];
        assert_eq!(chart.x_title, "Year");
        assert!(chart.keep_columns.is_empty());
        assert!(chart.x_ticks.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let empty = DashboardConfig {
            charts: Vec::new(),
            ..DashboardConfig::default()
        };
        assert!(matches!(empty.validate(), Err(WrangleError::InvalidConfig(_))));

        let mut unkept = DashboardConfig::default();
        unkept.charts[1].keep_columns = vec!["Country Name".into(), "2015".into()];
        assert!(matches!(unkept.validate(), Err(WrangleError::InvalidConfig(_))));

        let mut no_years = DashboardConfig::default();
        no_years.charts[2].value_columns.clear();
        assert!(matches!(no_years.validate(), Err(WrangleError::InvalidConfig(_))));
    }
}
