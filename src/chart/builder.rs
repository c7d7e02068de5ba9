use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::figure::{Axis, Figure, Layout, Trace, TraceKind};
use super::palette::generate_palette;
use crate::config::DashboardConfig;
use crate::data::{clean_data, CleanRequest, LongTable};
use crate::error::Result;

/// Fixed x-axis ticks: first tick and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticks {
    pub tick0: i32,
    pub dtick: i32,
}

/// Everything that distinguishes one dashboard chart from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Indicator file, relative to the dashboard's `data_dir`.
    pub dataset: PathBuf,
    /// Columns to retain. Empty means the category column plus `value_columns`.
    #[serde(default)]
    pub keep_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub countries: Vec<String>,
    pub kind: TraceKind,
    pub title: String,
    #[serde(default = "default_x_title")]
    pub x_title: String,
    pub y_title: String,
    #[serde(default)]
    pub x_ticks: Option<Ticks>,
}

fn default_x_title() -> String {
    "Year".to_string()
}

impl ChartConfig {
    /// The reshape request this chart needs.
    pub fn request(&self, settings: &DashboardConfig) -> CleanRequest {
        let mut request = CleanRequest::new(settings.data_dir.join(&self.dataset))
            .category_column(settings.category_column.clone())
            .skip_rows(settings.skip_rows)
            .years(self.value_columns.iter().cloned())
            .countries(self.countries.iter().cloned());
        request.keep_columns = self.keep_columns.clone();
        request
    }

    fn layout(&self) -> Layout {
        let xaxis = match self.x_ticks {
            Some(t) => Axis {
                title: self.x_title.clone(),
                autotick: Some(false),
                tick0: Some(t.tick0),
                dtick: Some(t.dtick),
            },
            None => Axis::titled(&self.x_title),
        };
        Layout {
            title: self.title.clone(),
            xaxis,
            yaxis: Axis::titled(&self.y_title),
        }
    }
}

/// A built chart together with the tidy table it was drawn from.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub figure: Figure,
    pub table: LongTable,
}

/// Series for `table`, one per country in order of first appearance.
pub fn traces(table: &LongTable, kind: TraceKind) -> Vec<Trace> {
    let countries = table.countries();
    let colours = generate_palette(countries.len());
    countries
        .into_iter()
        .zip(colours)
        .map(|(name, color)| {
            let (x, y) = table.series(&name);
            Trace {
                kind,
                name,
                x,
                y,
                color,
            }
        })
        .collect()
}

/// Reshape the chart's dataset and turn it into a figure.
pub fn build_chart(chart: &ChartConfig, settings: &DashboardConfig) -> Result<ChartOutput> {
    let mut table = clean_data(&chart.request(settings))?;
    table.sort_by_year_desc();

    let data = traces(&table, chart.kind);
    debug!("'{}': {} traces", chart.title, data.len());

    Ok(ChartOutput {
        figure: Figure {
            data,
            layout: chart.layout(),
        },
        table,
    })
}

/// Build every configured chart, stopping at the first failure.
pub fn build_dashboard(config: &DashboardConfig) -> Result<Vec<ChartOutput>> {
    config.validate()?;
    let outputs = config
        .charts
        .iter()
        .map(|chart| build_chart(chart, config))
        .collect::<Result<Vec<_>>>()?;
    info!("built {} charts", outputs.len());
    Ok(outputs)
}

/// The dashboard's figure list.
pub fn return_figures(config: &DashboardConfig) -> Result<Vec<Figure>> {
    Ok(build_dashboard(config)?
        .into_iter()
        .map(|out| out.figure)
        .collect())
}
