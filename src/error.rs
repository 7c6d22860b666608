use thiserror::Error;

#[derive(Error, Debug)]
pub enum PennyError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown source: {0} (run `penny sources` to list adapters)")]
    UnknownSource(String),

    #[error("Unrecognized schema: no '{missing}' column after aliasing; headers present: {headers:?}")]
    UnrecognizedSchema {
        missing: &'static str,
        headers: Vec<String>,
    },

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Unknown bucket: {0} (expected SPEND, BILL, INCOME or TRANSFER)")]
    UnknownBucket(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PennyError>;
