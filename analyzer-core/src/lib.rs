//! analyzer-core: Core types for the statement analyzer

pub mod category;
pub mod insight;
pub mod transaction;

pub use category::{Category, CategoryConfig};
pub use insight::{Insight, InsightRule, Severity};
pub use transaction::{ScoredTransaction, Transaction, TransactionType};

/// Keyword-based merchant categorization
pub mod categorizer {
    use super::Category;

    /// Keyword groups in precedence order. The first group with a matching keyword wins.
    pub const KEYWORD_RULES: &[(Category, &[&str])] = &[
        (Category::Transport, &["uber", "lyft", "gas", "shell"]),
        (Category::Dining, &["starbucks", "mcdonalds", "restaurant", "doordash"]),
        (Category::Shopping, &["walmart", "target", "amazon"]),
        (Category::Entertainment, &["netflix", "spotify", "cinema", "ticket"]),
        (Category::Grocery, &["kroger", "whole foods", "trader"]),
        (Category::Housing, &["electric", "rent", "water"]),
    ];

    /// Categorize a merchant description
    pub fn categorize(description: &str) -> Category {
        let desc = description.to_lowercase();

        KEYWORD_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }

}

pub use categorizer::categorize;
