//! Duplicate-WSN detection for the multi-entry grid.
//!
//! A WSN is repeated when two or more draft rows carry it after trimming.
//! Every row sharing a repeated WSN is flagged, the first occurrence included.

use std::collections::{HashMap, HashSet};

/// Trimmed WSNs occurring more than once. Blank values are ignored.
pub fn repeated_wsns<'a, I>(wsns: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for wsn in wsns {
        let wsn = wsn.trim();
        if !wsn.is_empty() {
            *counts.entry(wsn).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(wsn, _)| wsn.to_string())
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DuplicateIndex {
    /// Repeated inside the current draft set.
    repeated: HashSet<String>,
    /// Already stored server-side (fetched at load, grown by saved rows).
    existing: HashSet<String>,
}

impl DuplicateIndex {
    pub fn set_existing<I: IntoIterator<Item = String>>(&mut self, wsns: I) {
        self.existing = wsns
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
    }

    pub fn add_existing(&mut self, wsn: &str) {
        let wsn = wsn.trim();
        if !wsn.is_empty() {
            self.existing.insert(wsn.to_string());
        }
    }

    pub fn rescan<'a, I>(&mut self, draft_wsns: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.repeated = repeated_wsns(draft_wsns);
    }

    pub fn is_duplicate(&self, wsn: &str) -> bool {
        let wsn = wsn.trim();
        !wsn.is_empty() && (self.repeated.contains(wsn) || self.existing.contains(wsn))
    }

    pub fn is_repeated_in_draft(&self, wsn: &str) -> bool {
        self.repeated.contains(wsn.trim())
    }

    pub fn exists(&self, wsn: &str) -> bool {
        self.existing.contains(wsn.trim())
    }

    pub fn existing_len(&self) -> usize {
        self.existing.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_set_scenario() {
        let found = repeated_wsns(["A1", "A1", "B2"]);
        assert_eq!(found, HashSet::from(["A1".to_string()]));
    }

    #[test]
    fn test_trim_and_blank_handling() {
        let found = repeated_wsns([" A1", "A1 ", "", "  ", ""]);
        assert_eq!(found, HashSet::from(["A1".to_string()]));
    }

    #[test]
    fn test_existing_wsn_flags_single_row() {
        let mut idx = DuplicateIndex::default();
        idx.set_existing(vec!["X9".to_string(), " ".to_string()]);
        idx.rescan(["X9"]);
        assert!(idx.is_duplicate("X9"));
        assert!(idx.is_duplicate(" X9 "));
        assert!(!idx.is_repeated_in_draft("X9"));
        assert!(idx.exists("X9"));
        assert_eq!(idx.existing_len(), 1);
        assert!(!idx.is_duplicate(""));
    }

    #[test]
    fn test_rescan_replaces_previous_result() {
        let mut idx = DuplicateIndex::default();
        idx.rescan(["A", "A"]);
        assert!(idx.is_duplicate("A"));
        idx.rescan(["A", "B"]);
        assert!(!idx.is_duplicate("A"));
    }
}
