use crate::shared::config::config;
use chrono::NaiveDate;
use contracts::domain::a003_inbound::{InboundPage, InboundQuery, InboundRecord};
use leptos::prelude::*;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InboundFilters {
    pub search: String,
    pub brand: String,
    pub category: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub batch_id: Option<String>,
}

impl InboundFilters {
    /// Filters that make an export fetch the whole selection.
    pub fn has_range_or_batch(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some() || self.batch_id.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FilterChange {
    Search(String),
    Brand(String),
    Category(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Batch(Option<String>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug, PartialEq)]
pub enum ExportPlan {
    /// Fetch everything matching the filters in one request.
    Fetch(InboundQuery),
    /// Export the rows already on screen.
    CurrentPage,
}

#[derive(Clone, Debug)]
pub struct InboundListState {
    pub items: Vec<InboundRecord>,
    pub filters: InboundFilters,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub is_loading: bool,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    generation: u64,
}

impl Default for InboundListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filters: InboundFilters::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            is_loading: false,
            brands: Vec::new(),
            categories: Vec::new(),
            generation: 0,
        }
    }
}

impl InboundListState {
    /// Applies a filter edit. Any effective change sends the user back to page 1.
    pub fn set_filter(&mut self, change: FilterChange) -> bool {
        let f = &mut self.filters;
        let changed = match change {
            FilterChange::Search(v) => replace(&mut f.search, v),
            FilterChange::Brand(v) => replace(&mut f.brand, v),
            FilterChange::Category(v) => replace(&mut f.category, v),
            FilterChange::StartDate(v) => replace(&mut f.start_date, v),
            FilterChange::EndDate(v) => replace(&mut f.end_date, v),
            FilterChange::Batch(v) => {
                let v = v.filter(|b| !b.trim().is_empty());
                replace(&mut f.batch_id, v)
            }
        };
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.filters.is_empty() {
            return false;
        }
        self.filters = InboundFilters::default();
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn set_page_size(&mut self, size: u32) {
        if size > 0 && size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn query(&self, warehouse_id: i64) -> InboundQuery {
        InboundQuery {
            page: self.page,
            limit: self.page_size,
            warehouse_id,
            search: self.filters.search.trim().to_string(),
            brand: self.filters.brand.clone(),
            category: self.filters.category.clone(),
            start_date: self.filters.start_date,
            end_date: self.filters.end_date,
            batch_id: self.filters.batch_id.clone(),
        }
    }

    /// Starts a load; only the newest ticket may apply its answer.
    pub fn begin_load(&mut self, warehouse_id: i64) -> (LoadTicket, InboundQuery) {
        self.generation += 1;
        self.is_loading = true;
        (LoadTicket(self.generation), self.query(warehouse_id))
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn apply_page(&mut self, ticket: LoadTicket, page: InboundPage) -> bool {
        if !self.is_current(ticket) {
            log::debug!("inbound list: stale page discarded");
            return false;
        }
        self.items = page.data;
        self.total = page.total;
        self.is_loading = false;
        true
    }

    /// A failed load keeps the rows already shown.
    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.is_loading = false;
        true
    }

    /// Drops rows and in-flight loads, e.g. after a warehouse switch.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.total = 0;
        self.page = 1;
        self.is_loading = false;
    }

    pub fn export_plan(&self, warehouse_id: i64) -> ExportPlan {
        if !self.filters.has_range_or_batch() {
            return ExportPlan::CurrentPage;
        }
        let mut query = self.query(warehouse_id);
        query.page = 1;
        query.limit = config().export_limit;
        ExportPlan::Fetch(query)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

pub fn create_state() -> RwSignal<InboundListState> {
    RwSignal::new(InboundListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: u64, wsns: &[&str]) -> InboundPage {
        let data = wsns
            .iter()
            .enumerate()
            .map(|(i, w)| {
                serde_json::from_value(serde_json::json!({
                    "id": i,
                    "wsn": w,
                    "inbound_date": "2024-05-01",
                    "warehouse_id": 1,
                    "created_at": "2024-05-01T10:00:00Z"
                }))
                .unwrap()
            })
            .collect();
        InboundPage { data, total }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut s = InboundListState { total: 500, ..Default::default() };
        s.set_page(4);
        assert_eq!(s.page, 4);
        assert!(s.set_filter(FilterChange::Brand("Acme".into())));
        assert_eq!(s.page, 1);

        s.set_page(3);
        assert!(!s.set_filter(FilterChange::Brand("Acme".into())));
        assert_eq!(s.page, 3);

        for change in [
            FilterChange::Search("tv".into()),
            FilterChange::Category("Audio".into()),
            FilterChange::StartDate(Some(date(1))),
            FilterChange::EndDate(Some(date(9))),
            FilterChange::Batch(Some("B-12".into())),
        ] {
            s.set_page(2);
            assert!(s.set_filter(change));
            assert_eq!(s.page, 1);
        }
    }

    #[test]
    fn test_blank_batch_counts_as_none() {
        let mut s = InboundListState::default();
        assert!(!s.set_filter(FilterChange::Batch(Some("  ".into()))));
        assert_eq!(s.filters.batch_id, None);
    }

    #[test]
    fn test_query_shape() {
        let mut s = InboundListState::default();
        s.set_filter(FilterChange::Search("  phone ".into()));
        s.set_filter(FilterChange::StartDate(Some(date(2))));
        let q = s.query(9);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(q.warehouse_id, 9);
        assert_eq!(q.search, "phone");
        assert_eq!(
            serde_qs::to_string(&q).unwrap(),
            "page=1&limit=50&warehouseId=9&search=phone&startDate=2024-05-02"
        );
    }

    #[test]
    fn test_only_latest_load_applies() {
        let mut s = InboundListState::default();
        let (first, _) = s.begin_load(1);
        let (second, _) = s.begin_load(1);
        assert!(s.apply_page(second, page_of(2, &["B1", "B2"])));
        assert!(!s.apply_page(first, page_of(1, &["A1"])));
        assert_eq!(s.items.len(), 2);
        assert_eq!(s.items[0].entry.wsn, "B1");
        assert_eq!(s.total, 2);
        assert!(!s.is_loading);
    }

    #[test]
    fn test_failed_load_keeps_rows() {
        let mut s = InboundListState::default();
        let (t, _) = s.begin_load(1);
        s.apply_page(t, page_of(1, &["A1"]));
        let (t, _) = s.begin_load(1);
        assert!(s.fail_load(t));
        assert_eq!(s.items.len(), 1);
        assert!(!s.is_loading);
    }

    #[test]
    fn test_invalidate_discards_in_flight() {
        let mut s = InboundListState::default();
        let (t, _) = s.begin_load(1);
        s.invalidate();
        assert!(!s.apply_page(t, page_of(1, &["A1"])));
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_total_pages_and_clamp() {
        let mut s = InboundListState::default();
        assert_eq!(s.total_pages(), 1);
        s.total = 101;
        assert_eq!(s.total_pages(), 3);
        s.set_page(10);
        assert_eq!(s.page, 3);
        s.set_page(0);
        assert_eq!(s.page, 1);
        s.set_page_size(25);
        assert_eq!(s.total_pages(), 5);
    }

    #[test]
    fn test_export_plan() {
        let mut s = InboundListState::default();
        s.set_filter(FilterChange::Brand("Acme".into()));
        assert_eq!(s.export_plan(1), ExportPlan::CurrentPage);

        s.total = 400;
        s.set_page(3);
        s.set_filter(FilterChange::Batch(Some("B-7".into())));
        match s.export_plan(1) {
            ExportPlan::Fetch(q) => {
                assert_eq!(q.page, 1);
                assert_eq!(q.limit, 10_000);
                assert_eq!(q.batch_id.as_deref(), Some("B-7"));
                assert_eq!(q.brand, "Acme");
            }
            other => panic!("unexpected plan {:?}", other),
        }
    }

    #[test]
    fn test_clear_filters() {
        let mut s = InboundListState::default();
        assert!(!s.clear_filters());
        s.set_filter(FilterChange::Category("Audio".into()));
        assert!(s.clear_filters());
        assert!(s.filters.is_empty());
    }
}
