//! Application state for the dashboard front ends.
//!
//! All UI state lives in one `AppState` value; every user event is an
//! `Action` applied by `reduce`. Derived analytics are recomputed on read.

use analyzer_core::Transaction;
use analyzer_finance::{aggregate, demo_transactions, Analysis};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Upload,
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub view: View,
    pub transactions: Vec<Transaction>,
    pub search: String,
    pub dragging: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadDemo,
    /// A new upload began; clears any previous error
    UploadStarted,
    UploadSucceeded(Vec<Transaction>),
    /// User-facing failure message; the current set is kept
    UploadFailed(String),
    DeleteTransaction(usize),
    SetSearch(String),
    DragEnter,
    DragLeave,
    ShowUpload,
    ShowDashboard,
}

impl AppState {
    pub fn reduce(mut self, action: Action) -> Self {
        debug!(?action, "reduce");
        match action {
            Action::LoadDemo => {
                self.transactions = demo_transactions();
                self.error = None;
                self.view = View::Dashboard;
            }
            Action::UploadStarted => {
                self.error = None;
            }
            Action::UploadSucceeded(txns) => {
                self.transactions = txns;
                self.dragging = false;
                self.view = View::Dashboard;
            }
            Action::UploadFailed(message) => {
                self.dragging = false;
                self.error = Some(message);
            }
            Action::DeleteTransaction(id) => {
                if let Some(pos) = self.transactions.iter().position(|t| t.id == id) {
                    self.transactions.remove(pos);
                }
            }
            Action::SetSearch(term) => self.search = term,
            Action::DragEnter => self.dragging = true,
            Action::DragLeave => self.dragging = false,
            Action::ShowUpload => self.view = View::Upload,
            Action::ShowDashboard => self.view = View::Dashboard,
        }
        self
    }

    /// Recomputed from the current transaction set on every call
    pub fn analysis(&self) -> Option<Analysis> {
        aggregate(&self.transactions)
    }

    /// Which screen to draw. An empty set always shows the upload view.
    pub fn screen(&self) -> View {
        if self.view == View::Dashboard && !self.transactions.is_empty() {
            View::Dashboard
        } else {
            View::Upload
        }
    }

    pub fn visible_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.matches_search(&self.search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_demo() -> AppState {
        AppState::default().reduce(Action::LoadDemo)
    }

    #[test]
    fn test_starts_on_upload() {
        let s = AppState::default();
        assert_eq!(s.screen(), View::Upload);
        assert!(s.analysis().is_none());
    }

    #[test]
    fn test_load_demo() {
        let s = AppState {
            error: Some("old".into()),
            ..Default::default()
        }
        .reduce(Action::LoadDemo);
        assert_eq!(s.screen(), View::Dashboard);
        assert_eq!(s.transactions.len(), 12);
        assert_eq!(s.error, None);
    }

    #[test]
    fn test_failed_upload_keeps_prior_set() {
        let s = state_with_demo()
            .reduce(Action::UploadStarted)
            .reduce(Action::UploadFailed("bad file".into()));
        assert_eq!(s.transactions.len(), 12);
        assert_eq!(s.error.as_deref(), Some("bad file"));

        let s = s.reduce(Action::UploadStarted);
        assert_eq!(s.error, None);
    }

    #[test]
    fn test_upload_replaces_set() {
        let new = vec![Transaction::new(0, "2023-11-01", "Kroger", 40.0)];
        let s = state_with_demo()
            .reduce(Action::ShowUpload)
            .reduce(Action::UploadSucceeded(new.clone()));
        assert_eq!(s.transactions, new);
        assert_eq!(s.screen(), View::Dashboard);
    }

    #[test]
    fn test_delete_removes_one_and_recomputes() {
        let s = state_with_demo();
        let before = s.analysis().unwrap();

        let s = s.reduce(Action::DeleteTransaction(7)); // Cinema City, 35.00
        assert_eq!(s.transactions.len(), 11);
        assert!(s.transactions.iter().all(|t| t.id != 7));

        let after = s.analysis().unwrap();
        assert!((before.total_spend - after.total_spend - 35.0).abs() < 1e-9);
        assert_eq!(before.total_points - after.total_points, 70);
        // entertainment falls to 19.99, so the subscription alert disappears
        assert_eq!(after.rule_insights().count(), 0);

        let unchanged = s.clone().reduce(Action::DeleteTransaction(999));
        assert_eq!(unchanged, s);
    }

    #[test]
    fn test_deleting_everything_returns_to_upload() {
        let mut s = AppState::default().reduce(Action::UploadSucceeded(vec![Transaction::new(
            0,
            "2023-10-01",
            "Uber",
            10.0,
        )]));
        assert_eq!(s.screen(), View::Dashboard);
        s = s.reduce(Action::DeleteTransaction(0));
        assert_eq!(s.screen(), View::Upload);
        assert!(s.analysis().is_none());
    }

    #[test]
    fn test_search_filter() {
        let s = state_with_demo().reduce(Action::SetSearch("UBER".into()));
        let hits: Vec<_> = s.visible_transactions().map(|t| t.description.as_str()).collect();
        assert_eq!(hits, vec!["Uber Trip", "Uber Eats"]);

        let s = s.reduce(Action::SetSearch("zzz".into()));
        assert_eq!(s.visible_transactions().count(), 0);
    }

    #[test]
    fn test_drag_flags() {
        let s = AppState::default().reduce(Action::DragEnter);
        assert!(s.dragging);
        let s = s.reduce(Action::UploadFailed("x".into()));
        assert!(!s.dragging);
        let s = s.reduce(Action::DragEnter).reduce(Action::DragLeave);
        assert!(!s.dragging);
    }
}
