use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The requested template name is not in the catalog.
    #[error("unknown pattern '{}' (available: {})", .name, .available.join(", "))]
    UnknownPattern { name: String, available: Vec<String> },

    /// A template without call patterns has no total weight to sample from.
    #[error("template '{0}' has no call patterns")]
    EmptyCallPatterns(String),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// A DCI or reference table is missing, unreadable, or does not match its schema.
    #[error("invalid input: {0}")]
    Input(String),

    /// No service survived the inner join. Informational: callers report it and continue.
    #[error("no matching services between DCI results ({dci_rows} rows) and reference data ({reference_rows} rows)")]
    JoinMismatch {
        dci_rows: usize,
        reference_rows: usize,
    },

    #[error("cannot summarize an empty set of rows")]
    EmptyRows,

    #[error("need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("column '{0}' has zero variance")]
    ZeroVariance(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
