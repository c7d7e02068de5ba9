use thiserror::Error;

pub type Result<T> = std::result::Result<T, WrangleError>;

#[derive(Error, Debug)]
pub enum WrangleError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("Column '{0}' not found in source table")]
    MissingColumn(String),

    #[error("Cannot parse year from column label '{0}'")]
    InvalidYear(String),

    #[error("Non-numeric value '{value}' for {country} in column '{column}'")]
    NonNumericValue {
        country: String,
        column: String,
        value: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WrangleError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        WrangleError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
