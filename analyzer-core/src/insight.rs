//! Advisory messages generated from spending patterns

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// Which rule produced an insight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InsightRule {
    HighDining,
    SubscriptionAlert,
    /// Always shown, independent of the data
    MaximizeRewards,
}

impl InsightRule {
    pub fn is_static(&self) -> bool {
        matches!(self, InsightRule::MaximizeRewards)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub title: String,
    pub description: String,
    /// Whole dollars
    pub estimated_saving: Option<u64>,
    pub severity: Severity,
    pub rule: InsightRule,
}

impl Insight {
    pub fn new(
        rule: InsightRule,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        estimated_saving: Option<u64>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            estimated_saving,
            severity,
            rule,
        }
    }
}
