use thiserror::Error;

/// Reasons an upload is rejected as a whole. `Display` is the user-facing message.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("PDF and Excel files are not supported in this demo. Please convert to CSV.")]
    UnsupportedFormat,

    #[error("This file appears to be binary. Please upload a standard CSV file.")]
    BinaryContentDetected,

    #[error("Could not parse valid transactions. Ensure CSV format: Date, Description, Amount")]
    NoValidTransactions,

    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single statement row was dropped. Never surfaced to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected at least 2 comma-separated fields, found {0}")]
    TooFewFields(usize),

    #[error("description is empty")]
    EmptyDescription,

    #[error("amount {0:?} is not a number")]
    InvalidAmount(String),

    #[error("amount is zero")]
    ZeroAmount,
}

pub type Result<T> = std::result::Result<T, IngestError>;
