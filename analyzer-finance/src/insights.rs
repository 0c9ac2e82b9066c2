//! Threshold rules that turn a category breakdown into advice.
//!
//! Rules are independent and evaluated in declaration order; the static
//! rewards tip is always appended last.

use analyzer_core::{Category, Insight, InsightRule, Severity};

/// Dining spend above this triggers the cooking-at-home warning
pub const DINING_THRESHOLD: f64 = 150.0;
/// Share of dining spend we estimate could be saved
pub const DINING_SAVING_RATE: f64 = 0.3;
/// Entertainment spend above this triggers the subscription check
pub const ENTERTAINMENT_THRESHOLD: f64 = 50.0;
/// Flat saving quoted for unused subscriptions
pub const SUBSCRIPTION_SAVING: u64 = 15;

/// Build the insight list from per-category spend.
/// `spend_for` returns the accumulated debit amount for a category.
pub fn generate(spend_for: impl Fn(Category) -> f64) -> Vec<Insight> {
    let mut insights = Vec::new();

    let dining = spend_for(Category::Dining);
    if dining > DINING_THRESHOLD {
        insights.push(high_dining(dining));
    }

    if spend_for(Category::Entertainment) > ENTERTAINMENT_THRESHOLD {
        insights.push(subscription_alert());
    }

    insights.push(maximize_rewards());
    insights
}

fn high_dining(dining: f64) -> Insight {
    let saving = (dining * DINING_SAVING_RATE).round();
    Insight::new(
        InsightRule::HighDining,
        Severity::Warning,
        "High Dining Spend",
        format!(
            "You spent ${:.0} on dining out. Cooking at home 2 more nights a week could reduce this significantly.",
            dining.round()
        ),
        Some(saving as u64),
    )
}

fn subscription_alert() -> Insight {
    Insight::new(
        InsightRule::SubscriptionAlert,
        Severity::Info,
        "Subscription Alert",
        "Multiple entertainment charges detected. Ensure you are using all your active subscriptions.",
        Some(SUBSCRIPTION_SAVING),
    )
}

pub fn maximize_rewards() -> Insight {
    Insight::new(
        InsightRule::MaximizeRewards,
        Severity::Info,
        "Maximize Rewards",
        "You spent heavily on Dining. Switch to the Gold Card to earn 4x points instead of 3x.",
        None,
    )
}
