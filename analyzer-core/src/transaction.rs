//! Statement transaction records

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Direction of a transaction, inferred from the amount sign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

impl TransactionType {
    /// Negative amounts are credits (payments, refunds); everything else is a debit.
    pub fn from_amount(amount: f64) -> Self {
        if amount < 0.0 {
            TransactionType::Credit
        } else {
            TransactionType::Debit
        }
    }
}

/// A single statement line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique within the active set
    pub id: usize,
    /// Date text as it appeared on the statement (or an ISO-8601 timestamp fallback)
    pub date: String,
    /// Merchant label, trimmed and quote-stripped
    pub description: String,
    /// Positive = spend, negative = payment/refund
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Create a new Transaction, deriving the type from the amount sign
    pub fn new(
        id: usize,
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            description: description.into(),
            amount,
            kind: TransactionType::from_amount(amount),
        }
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TransactionType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }

    /// Best-effort calendar date for display. The raw `date` text is never validated.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let s = self.date.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
    }

    /// Case-insensitive merchant search
    pub fn matches_search(&self, term: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

/// A transaction decorated by aggregation. Only debits carry a category and points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<Category>,
    pub points: Option<u64>,
}
