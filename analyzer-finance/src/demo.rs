//! Fixed sample statement for exploring the dashboard without a file

use analyzer_core::Transaction;

const DEMO_ROWS: [(&str, &str, f64); 12] = [
    ("2023-10-01", "Starbucks Coffee", 15.50),
    ("2023-10-02", "Uber Trip", 24.00),
    ("2023-10-03", "Amazon Marketplace", 120.99),
    ("2023-10-05", "Netflix Subscription", 19.99),
    ("2023-10-06", "Shell Gas Station", 45.00),
    ("2023-10-08", "Whole Foods Market", 89.50),
    ("2023-10-10", "Cinema City", 35.00),
    ("2023-10-12", "McDonalds", 12.45),
    ("2023-10-15", "Target Store", 210.00),
    ("2023-10-18", "City Water Bill", 65.00),
    ("2023-10-20", "Uber Eats", 32.00),
    ("2023-10-22", "Payment Received", -1500.00),
];

/// The 12-row demo statement, ids 1 through 12
pub fn demo_transactions() -> Vec<Transaction> {
    DEMO_ROWS
        .iter()
        .enumerate()
        .map(|(i, (date, description, amount))| Transaction::new(i + 1, *date, *description, *amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use analyzer_core::{Category, InsightRule};

    #[test]
    fn test_demo_shape() {
        let txns = demo_transactions();
        assert_eq!(txns.len(), 12);
        assert_eq!(txns[0].id, 1);
        assert_eq!(txns[11].id, 12);
        assert_eq!(txns.iter().filter(|t| t.is_credit()).count(), 1);
    }

    #[test]
    fn test_demo_analysis() {
        let txns = demo_transactions();
        let a = aggregate(&txns).unwrap();

        let debit_sum: f64 = txns.iter().filter(|t| t.is_debit()).map(|t| t.amount).sum();
        assert!((a.total_spend - debit_sum).abs() < 1e-9);
        assert!((a.total_spend - 669.43).abs() < 1e-6);
        assert_eq!(a.total_points, 968);

        // "Uber Eats" lands in TRANSPORT, so dining stays under the threshold
        let dining = a.category(Category::Dining).unwrap();
        assert!((dining.amount - 27.95).abs() < 1e-9);
        assert_eq!(dining.count, 2);

        let order: Vec<_> = a.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Shopping,
                Category::Transport,
                Category::Grocery,
                Category::Housing,
                Category::Entertainment,
                Category::Dining,
            ]
        );

        let rules: Vec<_> = a.insights.iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec![InsightRule::SubscriptionAlert, InsightRule::MaximizeRewards]);
        assert_eq!(a.potential_savings(), 15);
    }
}
