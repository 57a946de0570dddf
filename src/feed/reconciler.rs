use std::collections::HashSet;

use crate::domain::{Order, OrderStatus};

/// Outcome of folding one snapshot into the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Pending orders absent from the previous snapshot, in snapshot order.
    pub new_pending: Vec<String>,
    /// Whether this batch deserves an alert. At most one per snapshot.
    pub notify: bool,
}

/// Detects pending orders that appeared since the previous snapshot.
///
/// Owns the ids of the last snapshot it saw and nothing else. One reconciler
/// lives for exactly one subscription; a new subscription starts from an
/// empty set, so its first snapshot never alerts.
#[derive(Debug, Default)]
pub struct FeedReconciler {
    known_ids: HashSet<String>,
}

impl FeedReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn known_ids(&self) -> &HashSet<String> {
        &self.known_ids
    }

    pub fn reconcile(&mut self, snapshot: &[Order]) -> Reconciliation {
        let new_pending: Vec<String> = snapshot
            .iter()
            .filter(|o| o.status == OrderStatus::Pendente && !self.known_ids.contains(&o.id))
            .map(|o| o.id.clone())
            .collect();

        // An empty known set means first emission, or the collection was
        // empty last time. Both are silent.
        let notify = !self.known_ids.is_empty() && !new_pending.is_empty();

        self.known_ids = snapshot.iter().map(|o| o.id.clone()).collect();

        Reconciliation { new_pending, notify }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    fn snapshot(entries: &[(&str, OrderStatus)]) -> Vec<Order> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (id, status))| Order::fixture(id, *status, i as i64))
            .collect()
    }

    fn ids(entries: &[&str]) -> HashSet<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_emission_never_notifies() {
        let mut reconciler = FeedReconciler::new();
        let result = reconciler.reconcile(&snapshot(&[("1", Pendente), ("2", Pendente)]));
        assert!(!result.notify);
        assert_eq!(result.new_pending, vec!["1", "2"]);
        assert_eq!(reconciler.known_ids(), &ids(&["1", "2"]));
    }

    #[test]
    fn new_pending_order_notifies_once() {
        let mut reconciler = FeedReconciler::new();

        let first = reconciler.reconcile(&snapshot(&[("1", Pendente)]));
        assert!(!first.notify);

        let second = reconciler.reconcile(&snapshot(&[("1", Pendente), ("2", Pendente)]));
        assert!(second.notify);
        assert_eq!(second.new_pending, vec!["2"]);

        let third = reconciler.reconcile(&snapshot(&[("1", Pendente), ("2", Aceito)]));
        assert!(!third.notify);
        assert!(third.new_pending.is_empty());
    }

    #[test]
    fn one_alert_for_a_batch_of_new_orders() {
        let mut reconciler = FeedReconciler::new();
        reconciler.reconcile(&snapshot(&[("1", Concluido)]));
        let result = reconciler.reconcile(&snapshot(&[
            ("1", Concluido),
            ("2", Pendente),
            ("3", Pendente),
            ("4", Pendente),
        ]));
        assert!(result.notify);
        assert_eq!(result.new_pending, vec!["2", "3", "4"]);
    }

    #[test]
    fn new_orders_in_other_statuses_are_ignored() {
        let mut reconciler = FeedReconciler::new();
        reconciler.reconcile(&snapshot(&[("1", Pendente)]));
        let result = reconciler.reconcile(&snapshot(&[("1", Pendente), ("2", EmPreparo)]));
        assert!(!result.notify);
    }

    #[test]
    fn known_ids_track_only_the_latest_snapshot() {
        let mut reconciler = FeedReconciler::new();
        reconciler.reconcile(&snapshot(&[("1", Pendente), ("2", Pendente)]));
        reconciler.reconcile(&snapshot(&[("2", Pendente)]));
        assert_eq!(reconciler.known_ids(), &ids(&["2"]));

        // "1" dropped out of the last snapshot, so its return counts as new.
        let result = reconciler.reconcile(&snapshot(&[("1", Pendente), ("2", Pendente)]));
        assert!(result.notify);
        assert_eq!(result.new_pending, vec!["1"]);
    }

    #[test]
    fn empty_snapshot_resets_first_emission_suppression() {
        let mut reconciler = FeedReconciler::new();
        reconciler.reconcile(&snapshot(&[("1", Concluido)]));
        reconciler.reconcile(&[]);
        assert!(reconciler.known_ids().is_empty());

        let result = reconciler.reconcile(&snapshot(&[("2", Pendente)]));
        assert!(!result.notify);
        assert_eq!(result.new_pending, vec!["2"]);
    }
}
