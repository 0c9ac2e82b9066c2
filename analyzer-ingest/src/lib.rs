//! analyzer-ingest: statement upload validation and CSV parsing.

pub mod error;
pub mod parsers;
pub mod types;
pub mod upload;

pub use error::{IngestError, RowError};
pub use parsers::csv_statement::{parse_statement_report, parse_statement_text};
pub use types::{ParseReport, UploadedFile};
pub use upload::{
    ingest_path, ingest_path_report, looks_binary, parse_upload, parse_upload_report, read_upload,
};
