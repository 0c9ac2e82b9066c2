//! Aggregator: totals, reward points, category breakdown and insights
//! computed from a transaction set.
//!
//! Aggregation borrows its input and returns decorated copies, so running it
//! repeatedly over the same set always produces the same analysis.

use analyzer_core::{categorize, Category, Insight, ScoredTransaction, Transaction};
use serde::Serialize;
use tracing::debug;

use crate::insights;

/// Accumulated debit spend for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub amount: f64,
    pub count: usize,
}

/// Everything the dashboard shows, derived from one transaction set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub total_spend: f64,
    pub total_points: u64,
    /// Categories with spend, largest first
    pub categories: Vec<CategorySpend>,
    /// Rule-triggered insights followed by the static rewards tip
    pub insights: Vec<Insight>,
    /// Input transactions in order, debits tagged with category and points
    pub transactions: Vec<ScoredTransaction>,
}

/// Aggregate a transaction set. Returns `None` when there is nothing to show.
pub fn aggregate(txns: &[Transaction]) -> Option<Analysis> {
    if txns.is_empty() {
        return None;
    }

    let mut breakdown: Vec<CategorySpend> = Category::ALL
        .iter()
        .map(|&category| CategorySpend {
            category,
            amount: 0.0,
            count: 0,
        })
        .collect();

    let mut total_spend = 0.0;
    let mut total_points = 0u64;
    let mut scored = Vec::with_capacity(txns.len());

    for txn in txns {
        if txn.is_credit() {
            scored.push(ScoredTransaction {
                transaction: txn.clone(),
                category: None,
                points: None,
            });
            continue;
        }

        let category = categorize(&txn.description);
        let points = category.points_for(txn.amount);

        total_spend += txn.amount;
        total_points += points;
        if let Some(acc) = breakdown.iter_mut().find(|c| c.category == category) {
            acc.amount += txn.amount;
            acc.count += 1;
        }

        scored.push(ScoredTransaction {
            transaction: txn.clone(),
            category: Some(category),
            points: Some(points),
        });
    }

    let spend_for = |category: Category| {
        breakdown
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
            .unwrap_or(0.0)
    };
    let insights = insights::generate(spend_for);

    // Stable sort: equal amounts keep enumeration order
    breakdown.retain(|c| c.amount != 0.0);
    breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    debug!(
        transactions = txns.len(),
        total_spend,
        total_points,
        categories = breakdown.len(),
        insights = insights.len(),
        "aggregated statement"
    );

    Some(Analysis {
        total_spend,
        total_points,
        categories: breakdown,
        insights,
        transactions: scored,
    })
}

impl Analysis {
    /// Sum of all estimated savings, in whole dollars
    pub fn potential_savings(&self) -> u64 {
        self.insights.iter().filter_map(|i| i.estimated_saving).sum()
    }

    /// Percentage of total spend attributed to a category
    pub fn category_share(&self, spend: &CategorySpend) -> f64 {
        if self.total_spend == 0.0 {
            return 0.0;
        }
        spend.amount / self.total_spend * 100.0
    }

    /// Dollar value of the points when redeemed as a statement credit
    pub fn redemption_value(&self) -> f64 {
        self.total_points as f64 / 100.0
    }

    /// Insights produced by spending rules (excludes the static tip)
    pub fn rule_insights(&self) -> impl Iterator<Item = &Insight> {
        self.insights.iter().filter(|i| !i.rule.is_static())
    }

    pub fn category(&self, category: Category) -> Option<&CategorySpend> {
        self.categories.iter().find(|c| c.category == category)
    }
}
