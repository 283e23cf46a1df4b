use crate::grid::CellId;
use itertools::Itertools;

#[derive(thiserror::Error, Debug)]
pub enum AccessError {
    #[error("failure reading data source: {0}")]
    DataSourceError(String),
    #[error("empty input: {0}")]
    EmptyInputError(String),
    #[error("invalid input: {0}")]
    InvalidInputError(String),
    #[error("travel time file '{file}' is missing required column '{column}'")]
    SchemaError { file: String, column: String },
    #[error("no travel time sources to aggregate")]
    NoSourcesError,
    #[error("travel time files missing for destination cells: {}", .0.iter().join(", "))]
    MissingSourcesError(Vec<CellId>),
    #[error("failure fetching facilities: {0}")]
    FetchError(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("{msg}: {source}")]
    CsvError { msg: String, source: csv::Error },
    #[error("io failure: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}
