use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use backend_client::TestRecord;

/// A selectable catalog test
///
/// `display_id` is a synthetic per-session identifier used only by the
/// selection UI; `backend_id` is the durable server identifier and the
/// only one that crosses the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOption {
    pub display_id: String,
    pub backend_id: i64,
    pub name: String,
    pub price: Decimal,
}

impl TestOption {
    /// Build a session-local option from a catalog record
    pub fn from_record(record: &TestRecord, sequence: usize) -> Self {
        Self {
            display_id: format!("opt-{sequence}"),
            backend_id: record.id,
            name: record.name.clone(),
            price: record.price,
        }
    }
}

/// Ordered, duplicate-free set of tests included in a bill or package
///
/// Insertion order is preserved: it is the order shown in the UI and the
/// order sent to the backend.
#[derive(Debug, Clone, Default)]
pub struct TestSelection {
    selected: Vec<TestOption>,
}

impl TestSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a test; a second add of the same display id is a no-op
    ///
    /// Returns whether the selection changed.
    pub fn add(&mut self, test: TestOption) -> bool {
        if self.contains(&test.display_id) {
            return false;
        }
        self.selected.push(test);
        true
    }

    /// Remove by display id; an absent id is a no-op, not an error
    ///
    /// Returns whether the selection changed.
    pub fn remove(&mut self, display_id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|t| t.display_id != display_id);
        self.selected.len() != before
    }

    pub fn contains(&self, display_id: &str) -> bool {
        self.selected.iter().any(|t| t.display_id == display_id)
    }

    pub fn selected(&self) -> &[TestOption] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Sum of the selected prices, recomputed on every call
    pub fn subtotal(&self) -> Decimal {
        self.selected.iter().map(|t| t.price).sum()
    }

    /// The offer list: everything in `all` not already selected
    ///
    /// Once chosen, a test disappears from the offer until removed.
    pub fn available<'a>(&self, all: &'a [TestOption]) -> Vec<&'a TestOption> {
        all.iter()
            .filter(|t| !self.contains(&t.display_id))
            .collect()
    }

    /// Backend ids in selection order, for submission payloads
    pub fn backend_ids(&self) -> Vec<i64> {
        self.selected.iter().map(|t| t.backend_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(seq: usize, id: i64, name: &str, price: &str) -> TestOption {
        TestOption {
            display_id: format!("opt-{seq}"),
            backend_id: id,
            name: name.to_string(),
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut selection = TestSelection::new();
        assert!(selection.add(option(1, 10, "CBC", "350.00")));
        assert!(!selection.add(option(1, 10, "CBC", "350.00")));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.subtotal(), "350.00".parse().unwrap());
    }

    #[test]
    fn test_readd_moves_to_end() {
        let mut selection = TestSelection::new();
        selection.add(option(1, 10, "CBC", "350.00"));
        selection.add(option(2, 11, "LFT", "700.00"));
        selection.add(option(3, 12, "KFT", "650.00"));

        selection.remove("opt-1");
        selection.add(option(1, 10, "CBC", "350.00"));

        let order: Vec<&str> = selection
            .selected()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(order, vec!["LFT", "KFT", "CBC"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut selection = TestSelection::new();
        selection.add(option(1, 10, "CBC", "350.00"));
        assert!(!selection.remove("opt-99"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_subtotal_tracks_adds_and_removes() {
        let mut selection = TestSelection::new();
        selection.add(option(1, 10, "CBC", "350.00"));
        selection.add(option(2, 11, "LFT", "700.00"));
        assert_eq!(selection.subtotal(), "1050.00".parse().unwrap());

        selection.remove("opt-2");
        assert_eq!(selection.subtotal(), "350.00".parse().unwrap());
    }

    #[test]
    fn test_selected_tests_leave_the_offer_list() {
        let all = vec![
            option(1, 10, "CBC", "350.00"),
            option(2, 11, "LFT", "700.00"),
            option(3, 12, "KFT", "650.00"),
        ];
        let mut selection = TestSelection::new();
        selection.add(all[1].clone());

        let offered: Vec<&str> = selection
            .available(&all)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(offered, vec!["CBC", "KFT"]);

        selection.remove("opt-2");
        assert_eq!(selection.available(&all).len(), 3);
    }

    #[test]
    fn test_backend_ids_follow_selection_order() {
        let mut selection = TestSelection::new();
        selection.add(option(2, 11, "LFT", "700.00"));
        selection.add(option(1, 10, "CBC", "350.00"));
        assert_eq!(selection.backend_ids(), vec![11, 10]);
    }
}
