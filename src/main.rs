use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use wb_dashboard::chart::{build_dashboard, Figure};
use wb_dashboard::data::loader::WORLD_BANK_SKIP_ROWS;
use wb_dashboard::data::reshape::COUNTRY_COLUMN;
use wb_dashboard::data::{clean_data, CleanRequest};
use wb_dashboard::storage::{save_long_csv, write_long_csv};
use wb_dashboard::DashboardConfig;

#[derive(Parser)]
#[command(name = "wb-dashboard")]
#[command(about = "Wrangle World Bank indicator CSVs into dashboard chart data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard figures and print them as JSON
    Figures {
        /// JSON dashboard config (defaults to the built-in four charts)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the indicator files (overrides the config)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save each chart's tidy table as chart_<n>.csv in this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Reshape one indicator file into country,year,value CSV
    Clean {
        /// World Bank CSV (or .parquet) file
        dataset: PathBuf,

        /// Countries to keep, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        countries: Vec<String>,

        /// Year columns to unpivot, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        years: Vec<String>,

        #[arg(long, default_value = COUNTRY_COLUMN)]
        category_column: String,

        #[arg(long, default_value_t = WORLD_BANK_SKIP_ROWS)]
        skip_rows: usize,

        /// Write CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Figures {
            config,
            data_dir,
            output,
            export_dir,
            pretty,
        } => figures(config, data_dir, output, export_dir, pretty),
        Commands::Clean {
            dataset,
            countries,
            years,
            category_column,
            skip_rows,
            output,
        } => {
            let request = CleanRequest::new(dataset)
                .years(years)
                .countries(countries)
                .category_column(category_column)
                .skip_rows(skip_rows);

            let table = clean_data(&request)
                .with_context(|| format!("cleaning {}", request.dataset.display()))?;
            match output {
                Some(path) => save_long_csv(&table, &path)?,
                None => write_long_csv(&table, std::io::stdout().lock())?,
            }
            Ok(())
        }
    }
}

fn figures(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    export_dir: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let mut config = match config {
        Some(path) => DashboardConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    let outputs = build_dashboard(&config).context("building dashboard")?;

    if let Some(dir) = export_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        for (i, out) in outputs.iter().enumerate() {
            save_long_csv(&out.table, &dir.join(format!("chart_{}.csv", i + 1)))?;
        }
    }

    let figures: Vec<&Figure> = outputs.iter().map(|out| &out.figure).collect();
    let json = if pretty {
        serde_json::to_string_pretty(&figures)?
    } else {
        serde_json::to_string(&figures)?
    };
    write_output(output.as_deref(), &json)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote figures to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
    }
    Ok(())
}
