use contracts::domain::a003_inbound::BatchSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchTicket(u64);

#[derive(Clone, Debug, Default)]
pub struct BatchListState {
    pub items: Vec<BatchSummary>,
    pub is_loading: bool,
    /// Batch waiting for delete confirmation.
    pub pending_delete: Option<String>,
    /// Batch whose delete request is in flight.
    pub deleting: Option<String>,
    generation: u64,
}

impl BatchListState {
    pub fn begin_load(&mut self) -> BatchTicket {
        self.generation += 1;
        self.is_loading = true;
        BatchTicket(self.generation)
    }

    pub fn apply(&mut self, ticket: BatchTicket, mut items: Vec<BatchSummary>) -> bool {
        if ticket.0 != self.generation {
            log::debug!("batch list: stale load discarded");
            return false;
        }
        // Newest first; undated batches last.
        items.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        self.items = items;
        self.is_loading = false;
        true
    }

    pub fn fail(&mut self, ticket: BatchTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.is_loading = false;
        true
    }

    pub fn request_delete(&mut self, batch_id: &str) {
        if self.deleting.is_none() {
            self.pending_delete = Some(batch_id.to_string());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Moves the pending batch into the in-flight slot.
    pub fn confirm_delete(&mut self) -> Option<String> {
        if self.deleting.is_some() {
            return None;
        }
        let id = self.pending_delete.take()?;
        self.deleting = Some(id.clone());
        Some(id)
    }

    pub fn finish_delete(&mut self) {
        self.deleting = None;
    }

    pub fn total_rows(&self) -> u64 {
        self.items.iter().map(|b| b.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: &str, count: u64, updated: Option<&str>) -> BatchSummary {
        BatchSummary {
            batch_id: id.to_string(),
            count,
            last_updated: updated.map(String::from),
        }
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut s = BatchListState::default();
        let first = s.begin_load();
        let second = s.begin_load();
        assert!(s.apply(second, vec![batch("B2", 5, None)]));
        assert!(!s.apply(first, vec![batch("B1", 1, None)]));
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].batch_id, "B2");
        assert!(!s.fail(first));
    }

    #[test]
    fn test_sorted_newest_first() {
        let mut s = BatchListState::default();
        let t = s.begin_load();
        s.apply(
            t,
            vec![
                batch("old", 1, Some("2024-01-01T00:00:00Z")),
                batch("none", 1, None),
                batch("new", 2, Some("2024-06-01T00:00:00Z")),
            ],
        );
        let ids: Vec<&str> = s.items.iter().map(|b| b.batch_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "none"]);
        assert_eq!(s.total_rows(), 4);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut s = BatchListState::default();
        assert_eq!(s.confirm_delete(), None);

        s.request_delete("B1");
        s.cancel_delete();
        assert_eq!(s.confirm_delete(), None);

        s.request_delete("B1");
        assert_eq!(s.confirm_delete().as_deref(), Some("B1"));
        assert_eq!(s.pending_delete, None);

        // No second delete while one is in flight.
        s.request_delete("B2");
        assert_eq!(s.pending_delete, None);
        s.finish_delete();
        s.request_delete("B2");
        assert_eq!(s.confirm_delete().as_deref(), Some("B2"));
    }

    #[test]
    fn test_deleted_batch_is_gone_after_reload() {
        let mut s = BatchListState::default();
        let t = s.begin_load();
        s.apply(
            t,
            vec![
                batch("B1", 12, Some("2024-05-01T08:00:00Z")),
                batch("B2", 30, Some("2024-05-02T08:00:00Z")),
                batch("B3", 7, Some("2024-05-03T08:00:00Z")),
            ],
        );

        s.request_delete("B2");
        assert_eq!(s.confirm_delete().as_deref(), Some("B2"));
        s.finish_delete();
        assert_eq!(s.deleting, None);

        let reload = s.begin_load();
        assert!(s.apply(
            reload,
            vec![
                batch("B1", 12, Some("2024-05-01T08:00:00Z")),
                batch("B3", 7, Some("2024-05-03T08:00:00Z")),
            ],
        ));
        let left: Vec<(&str, u64)> = s.items.iter().map(|b| (b.batch_id.as_str(), b.count)).collect();
        assert_eq!(left, vec![("B3", 7), ("B1", 12)]);
        assert_eq!(s.total_rows(), 19);
        assert!(!s.is_loading);
    }
}
