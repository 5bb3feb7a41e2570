use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The queried title is not a key of the title index.
    #[error("Unknown title: '{0}'")]
    UnknownTitle(String),

    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Catalog contains no usable records: {0}")]
    EmptyCatalog(String),

    #[error("Dimension mismatch: expected {expected} rows, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
