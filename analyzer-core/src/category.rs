//! Spending categories and their display/reward configuration

use serde::{Deserialize, Serialize};

/// Spending categories, in fixed enumeration order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Dining,
    Shopping,
    Transport,
    Housing,
    Entertainment,
    Grocery,
    Other,
}

/// Display and reward settings attached to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryConfig {
    pub label: &'static str,
    /// Hex color used by the dashboard
    pub color: &'static str,
    pub points_multiplier: u32,
    /// Icon name (lucide naming)
    pub icon: &'static str,
}

impl Category {
    /// Every category in enumeration order. Breakdown ties keep this order.
    pub const ALL: [Category; 7] = [
        Category::Dining,
        Category::Shopping,
        Category::Transport,
        Category::Housing,
        Category::Entertainment,
        Category::Grocery,
        Category::Other,
    ];

    pub fn config(&self) -> CategoryConfig {
        match self {
            Category::Dining => CategoryConfig {
                label: "Dining & Food",
                color: "#f97316",
                points_multiplier: 3,
                icon: "coffee",
            },
            Category::Shopping => CategoryConfig {
                label: "Shopping",
                color: "#3b82f6",
                points_multiplier: 1,
                icon: "shopping-bag",
            },
            Category::Transport => CategoryConfig {
                label: "Transport",
                color: "#a855f7",
                points_multiplier: 2,
                icon: "car",
            },
            Category::Housing => CategoryConfig {
                label: "Housing & Utilities",
                color: "#14b8a6",
                points_multiplier: 1,
                icon: "home",
            },
            Category::Entertainment => CategoryConfig {
                label: "Entertainment",
                color: "#ec4899",
                points_multiplier: 2,
                icon: "zap",
            },
            Category::Grocery => CategoryConfig {
                label: "Groceries",
                color: "#22c55e",
                points_multiplier: 2,
                icon: "shopping-bag",
            },
            Category::Other => CategoryConfig {
                label: "Other",
                color: "#9ca3af",
                points_multiplier: 1,
                icon: "file-text",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn points_multiplier(&self) -> u32 {
        self.config().points_multiplier
    }

    /// Reward points for a debit of `amount` in this category.
    /// Negative amounts earn nothing.
    pub fn points_for(&self, amount: f64) -> u64 {
        let raw = (amount * f64::from(self.points_multiplier())).floor();
        if raw > 0.0 { raw as u64 } else { 0 }
    }

    /// Stable upper-case key, e.g. `DINING`
    pub fn key(&self) -> &'static str {
        match self {
            Category::Dining => "DINING",
            Category::Shopping => "SHOPPING",
            Category::Transport => "TRANSPORT",
            Category::Housing => "HOUSING",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Grocery => "GROCERY",
            Category::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(Category::Dining.points_multiplier(), 3);
        assert_eq!(Category::Transport.points_multiplier(), 2);
        assert_eq!(Category::Entertainment.points_multiplier(), 2);
        assert_eq!(Category::Grocery.points_multiplier(), 2);
        assert_eq!(Category::Shopping.points_multiplier(), 1);
        assert_eq!(Category::Housing.points_multiplier(), 1);
        assert_eq!(Category::Other.points_multiplier(), 1);
    }

    #[test]
    fn test_points_floor() {
        assert_eq!(Category::Dining.points_for(15.50), 46);
        assert_eq!(Category::Entertainment.points_for(19.99), 39);
        assert_eq!(Category::Shopping.points_for(0.99), 0);
        assert_eq!(Category::Shopping.points_for(-20.0), 0);
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"ENTERTAINMENT\"");
        let back: Category = serde_json::from_str("\"GROCERY\"").unwrap();
        assert_eq!(back, Category::Grocery);
    }

    #[test]
    fn test_all_is_enumeration_order() {
        let keys: Vec<_> = Category::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            ["DINING", "SHOPPING", "TRANSPORT", "HOUSING", "ENTERTAINMENT", "GROCERY", "OTHER"]
        );
    }
}
