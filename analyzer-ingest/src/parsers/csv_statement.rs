//! Line-oriented CSV statement parser
//!
//! Expected layout (header row is skipped, never validated):
//!   Date,Description,Amount
//!   2023-10-01,Starbucks Coffee,$15.50
//!   2023-10-22,Payment Received,-1500.00
//!
//! Columns are positional. Fields are split on every comma; quoted fields
//! containing commas are not supported.

use analyzer_core::Transaction;
use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use tracing::{debug, trace};

use crate::error::RowError;
use crate::types::ParseReport;

/// Dates shorter than this are replaced by the parse timestamp
const MIN_DATE_LEN: usize = 5;

/// A data row that passed validation, before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub date: String,
    pub description: String,
    pub amount: f64,
}

/// Parse one data line. `fallback_date` stands in for missing or too-short dates.
pub fn parse_row(line: &str, fallback_date: &str) -> Result<ParsedRow, RowError> {
    let cols: Vec<&str> = line.split(',').collect();
    if cols.len() < 2 {
        return Err(RowError::TooFewFields(cols.len()));
    }

    let date = cols[0].trim();
    let date = if date.chars().count() < MIN_DATE_LEN {
        fallback_date.to_string()
    } else {
        date.to_string()
    };

    let description = cols[1].replace('"', "").trim().to_string();
    if description.is_empty() {
        return Err(RowError::EmptyDescription);
    }

    let amount = parse_amount(cols.get(2).copied().unwrap_or(""))?;

    Ok(ParsedRow {
        date,
        description,
        amount,
    })
}

/// Leading decimal number: optional sign, digits with at most one `.`, optional exponent
fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("invalid amount regex")
    })
}

/// Strip `$` and `,`, then parse the leading number. Trailing text such as a
/// currency code is ignored. Missing amounts count as zero.
fn parse_amount(raw: &str) -> Result<f64, RowError> {
    let cleaned = raw.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(RowError::ZeroAmount);
    }

    let invalid = || RowError::InvalidAmount(raw.trim().to_string());
    let number = amount_re().find(cleaned).ok_or_else(invalid)?;
    let amount: f64 = number.as_str().parse().map_err(|_| invalid())?;
    // "1e999" overflows; an infinite amount would poison every total
    if !amount.is_finite() {
        return Err(invalid());
    }
    if amount == 0.0 {
        return Err(RowError::ZeroAmount);
    }
    Ok(amount)
}

/// Parse statement text, keeping track of dropped rows.
pub fn parse_statement_report(text: &str, now: DateTime<Utc>) -> ParseReport {
    let fallback_date = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut report = ParseReport::default();

    for (idx, line) in text.split('\n').enumerate().skip(1) {
        match parse_row(line, &fallback_date) {
            Ok(row) => {
                let id = report.transactions.len();
                trace!(id, description = %row.description, amount = row.amount, "parsed row");
                report
                    .transactions
                    .push(Transaction::new(id, row.date, row.description, row.amount));
            }
            Err(e) => {
                debug!(line = idx + 1, reason = %e, "dropping statement row");
                report.dropped.push((idx + 1, e));
            }
        }
    }

    report
}

/// Parse statement text into transactions. Malformed rows are dropped silently.
pub fn parse_statement_text(text: &str) -> Vec<Transaction> {
    parse_statement_report(text, Utc::now()).transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer_core::TransactionType;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_single_starbucks_row() {
        let text = "Date,Description,Amount\n2023-10-01,Starbucks Coffee,15.50\n";
        let report = parse_statement_report(text, fixed_now());

        assert_eq!(report.transactions.len(), 1);
        let t = &report.transactions[0];
        assert_eq!(t.id, 0);
        assert_eq!(t.date, "2023-10-01");
        assert_eq!(t.description, "Starbucks Coffee");
        assert_eq!(t.amount, 15.50);
        assert_eq!(t.kind, TransactionType::Debit);
        // trailing newline yields one empty line, dropped for having one field
        assert_eq!(report.dropped, vec![(3, RowError::TooFewFields(1))]);
    }

    #[test]
    fn test_header_only() {
        let report = parse_statement_report("Date,Description,Amount", fixed_now());
        assert!(report.transactions.is_empty());
        assert!(report.dropped.is_empty());
    }

    #[test]
    fn test_first_line_is_always_skipped() {
        let text = "2023-10-01,Uber Trip,24.00\n2023-10-02,Lyft,12.00";
        let txns = parse_statement_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "Lyft");
    }

    #[test]
    fn test_amount_cleaning_and_credit() {
        let text = "h\n2023-10-01,Amazon,$120.99\n2023-10-22,\"Payment Received\",-$1500.00\r\n";
        let txns = parse_statement_report(text, fixed_now()).transactions;
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, 120.99);
        assert_eq!(txns[1].description, "Payment Received");
        assert_eq!(txns[1].amount, -1500.0);
        assert_eq!(txns[1].kind, TransactionType::Credit);
    }

    #[test]
    fn test_thousands_separator_is_split_by_comma() {
        // "1,234.56" splits into two fields; only "$1" lands in the amount column
        let text = "h\n2023-10-01,Target,$1,234.56";
        let txns = parse_statement_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 1.0);
    }

    #[test]
    fn test_dropped_rows() {
        let text = "Date,Description,Amount\n\
                    just-one-field\n\
                    2023-10-01,   ,10.00\n\
                    2023-10-01,\"\",10.00\n\
                    2023-10-01,Coffee,abc\n\
                    2023-10-01,Coffee,0.00\n\
                    2023-10-01,Coffee\n\
                    2023-10-01,Coffee,NaN\n\
                    2023-10-01,Coffee,3.25";
        let report = parse_statement_report(text, fixed_now());

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].amount, 3.25);
        assert_eq!(report.transactions[0].id, 0);

        let reasons: Vec<_> = report.dropped.iter().map(|(_, r)| r.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                RowError::TooFewFields(1),
                RowError::EmptyDescription,
                RowError::EmptyDescription,
                RowError::InvalidAmount("abc".to_string()),
                RowError::ZeroAmount,
                RowError::ZeroAmount,
                RowError::InvalidAmount("NaN".to_string()),
            ]
        );
        assert_eq!(report.dropped[0].0, 2);
    }

    #[test]
    fn test_short_date_falls_back_to_now() {
        let text = "h\n10/1,Netflix,19.99\n,Spotify,9.99\n2023-10-05,Cinema,35";
        let txns = parse_statement_report(text, fixed_now()).transactions;
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].date, "2026-03-01T09:30:00.000Z");
        assert_eq!(txns[1].date, "2026-03-01T09:30:00.000Z");
        assert_eq!(txns[2].date, "2023-10-05");
    }

    #[test]
    fn test_amount_reads_leading_number() {
        let text = "h\n\
                    2023-10-01,Starbucks,15.50 USD\n\
                    2023-10-02,Uber,12.5.3\n\
                    2023-10-03,Kroger,abc\n\
                    2023-10-04,Target,Infinity\n\
                    2023-10-05,Amazon,1e999\n\
                    2023-10-06,Lyft,-.5 refund\n\
                    2023-10-07,Shell,2e1x\n\
                    2023-10-08,Spotify,  ";
        let report = parse_statement_report(text, fixed_now());

        let amounts: Vec<_> = report.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![15.5, 12.5, -0.5, 20.0]);
        assert_eq!(
            report.dropped,
            vec![
                (4, RowError::InvalidAmount("abc".to_string())),
                (5, RowError::InvalidAmount("Infinity".to_string())),
                (6, RowError::InvalidAmount("1e999".to_string())),
                (9, RowError::ZeroAmount),
            ]
        );
    }

    #[test]
    fn test_padded_short_date_uses_fallback() {
        let text = "h\n  ab  ,Netflix,19.99\n 2023-10-05 ,Cinema,35";
        let txns = parse_statement_report(text, fixed_now()).transactions;
        assert_eq!(txns[0].date, "2026-03-01T09:30:00.000Z");
        assert_eq!(txns[1].date, "2023-10-05");
    }

    #[test]
    fn test_ids_are_dense_over_survivors() {
        let text = "h\nbad\n2023-10-01,A,1\nbad\n2023-10-02,B,2\n2023-10-03,C,-3";
        let txns = parse_statement_text(text);
        let ids: Vec<_> = txns.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let text = "h\n2023-10-01,Kroger,45.10,GROCERIES,ref-123";
        let txns = parse_statement_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 45.10);
    }
}
