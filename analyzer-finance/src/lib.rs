//! analyzer-finance: spend aggregation, reward points, insight rules, and the demo statement

pub mod aggregator;
pub mod demo;
pub mod insights;

pub use aggregator::{aggregate, Analysis, CategorySpend};
pub use demo::demo_transactions;
