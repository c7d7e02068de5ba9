#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const HEALTH: &str = "API_SH.XPD.CHEX.PC.CD_DS2_en_csv_v2_2397.csv";
pub const POP65: &str = "API_SP.POP.65UP.TO.ZS_DS2_en_csv_v2_2339.csv";

pub const COUNTRIES: [&str; 14] = [
    "Aruba",
    "Austria",
    "Brazil",
    "Canada",
    "China",
    "Euro area",
    "France",
    "Germany",
    "India",
    "Italy",
    "Japan",
    "Switzerland",
    "United Kingdom",
    "United States",
];

/// Write a World Bank-shaped CSV: four metadata lines, trailing commas,
/// years 2010..=2022, and an empty 2010 column.
pub fn write_indicator(dir: &Path, name: &str, indicator: &str) -> PathBuf {
    let mut text = String::new();
    text.push_str("\"Data Source\",\"World Development Indicators\",\n\n");
    text.push_str("\"Last Updated Date\",\"2023-05-10\",\n\n");
    text.push_str("\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\"");
    for year in 2010..=2022 {
        write!(text, ",\"{year}\"").unwrap();
    }
    text.push_str(",\n");

    for (i, country) in COUNTRIES.iter().enumerate() {
        let code: String = country.chars().filter(|c| c.is_ascii_uppercase()).collect();
        write!(text, "\"{country}\",\"{code}\",\"{indicator}\",\"X.Y.Z\"").unwrap();
        for year in 2010..=2022 {
            if year == 2010 {
                text.push_str(",\"\"");
            } else {
                write!(text, ",\"{}\"", value(i, year)).unwrap();
            }
        }
        text.push_str(",\n");
    }

    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Deterministic fixture value for country index `i` in `year`.
pub fn value(i: usize, year: i32) -> f64 {
    (i as f64 + 1.0) * 100.0 + f64::from(year - 2000) * 0.5
}

pub fn index_of(country: &str) -> usize {
    COUNTRIES.iter().position(|c| *c == country).unwrap()
}

pub fn years(from: i32, to: i32) -> Vec<String> {
    (from..=to).map(|y| y.to_string()).collect()
}
