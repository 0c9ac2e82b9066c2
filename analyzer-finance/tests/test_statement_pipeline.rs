use analyzer_core::{Category, InsightRule, TransactionType};
use analyzer_finance::{aggregate, demo_transactions};
use analyzer_ingest::{parse_upload, IngestError, UploadedFile};

const OCTOBER_CSV: &str = "Date,Description,Amount\n\
2023-10-01,Starbucks Coffee,$15.50\n\
2023-10-02,\"Doordash Order\",$64.20\n\
2023-10-03,Restaurant Nobu,$120.00\n\
2023-10-04,Spotify,9.99\n\
2023-10-05,Ticketmaster,$89.00\n\
2023-10-06,Trader Joes,54.10\n\
2023-10-07,amazon gas station,40.00\n\
2023-10-08,,12.00\n\
2023-10-09,Broken row,abc\n\
2023-10-10,Refund Amazon,-25.00\n\
2023-10-11,Electric Co,0\n\
2023-10-12,Payment Thank You,-500.00\n";

fn upload(name: &str, body: &str) -> UploadedFile {
    UploadedFile::new(name, body.as_bytes().to_vec())
}

/// Real-data style regression: parse an uploaded statement and aggregate it.
#[test]
fn test_upload_then_aggregate() {
    let txns = parse_upload(&upload("october.csv", OCTOBER_CSV)).unwrap();
    assert_eq!(txns.len(), 9);

    let ids: Vec<_> = txns.iter().map(|t| t.id).collect();
    assert_eq!(ids, (0..9).collect::<Vec<_>>());
    assert_eq!(txns[7].kind, TransactionType::Credit);

    let a = aggregate(&txns).unwrap();

    let debit_total: f64 = txns.iter().filter(|t| t.is_debit()).map(|t| t.amount).sum();
    assert!((a.total_spend - debit_total).abs() < 1e-9);

    let expected_points: u64 = txns
        .iter()
        .filter(|t| t.is_debit())
        .map(|t| analyzer_core::categorize(&t.description).points_for(t.amount))
        .sum();
    assert_eq!(a.total_points, expected_points);

    let dining = a.category(Category::Dining).unwrap();
    assert_eq!(dining.count, 3);
    assert!((dining.amount - 199.70).abs() < 1e-9);

    // "amazon gas station" resolves to TRANSPORT
    let transport = a.category(Category::Transport).unwrap();
    assert_eq!(transport.count, 1);
    assert!(a.category(Category::Shopping).is_none());

    let rules: Vec<_> = a.insights.iter().map(|i| i.rule).collect();
    assert_eq!(
        rules,
        vec![
            InsightRule::HighDining,
            InsightRule::SubscriptionAlert,
            InsightRule::MaximizeRewards
        ]
    );
    // round(199.70 * 0.3) = 60
    assert_eq!(a.insights[0].estimated_saving, Some(60));

    for w in a.categories.windows(2) {
        assert!(w[0].amount >= w[1].amount, "breakdown not sorted");
    }
}

#[test]
fn test_rejections_leave_no_batch() {
    let pdf = parse_upload(&upload("statement.pdf", OCTOBER_CSV)).unwrap_err();
    assert!(matches!(pdf, IngestError::UnsupportedFormat));

    let header_only = parse_upload(&upload("empty.csv", "Date,Description,Amount\n")).unwrap_err();
    assert!(matches!(header_only, IngestError::NoValidTransactions));
}

#[test]
fn test_demo_recomputes_after_deletion() {
    let mut txns = demo_transactions();
    let before = aggregate(&txns).unwrap();

    // drop the Target purchase (id 9)
    txns.retain(|t| t.id != 9);
    assert_eq!(txns.len(), 11);
    let after = aggregate(&txns).unwrap();

    assert!((before.total_spend - after.total_spend - 210.0).abs() < 1e-9);
    assert_eq!(before.total_points - after.total_points, 210);
    assert_eq!(after.categories[0].category, Category::Shopping);
    assert!((after.categories[0].amount - 120.99).abs() < 1e-9);
}
