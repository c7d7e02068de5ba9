//! World Bank indicator wrangling for a dashboard.
//!
//! Reads World Bank CSV exports (four metadata lines, a `Country Name`
//! column, one column per year), reshapes them into tidy
//! `(country, year, value)` tables, and turns those into plotly-style
//! figure specs.
//!
//! ```no_run
//! use wb_dashboard::data::{clean_data, CleanRequest};
//!
//! let request = CleanRequest::new("data/API_SH.XPD.CHEX.PC.CD_DS2_en_csv_v2_2397.csv")
//!     .years(["2015", "2016", "2017"])
//!     .countries(["Germany", "Austria"]);
//! let table = clean_data(&request)?;
//! println!("{} rows", table.len());
//! # Ok::<(), wb_dashboard::WrangleError>(())
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod storage;

pub use chart::{return_figures, Figure};
pub use config::DashboardConfig;
pub use error::{Result, WrangleError};
