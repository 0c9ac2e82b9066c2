use analyzer_core::Transaction;
use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// A user-supplied file: its name and raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Content decoded as UTF-8; invalid sequences become U+FFFD
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Outcome of parsing statement text, including the rows that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub transactions: Vec<Transaction>,
    /// (1-based line number in the file, reason)
    pub dropped: Vec<(usize, RowError)>,
}
