//! Tab registry: the one place mapping a tab key to its title and view.

use crate::domain::a003_inbound::ui::batches::BatchList;
use crate::domain::a003_inbound::ui::details::InboundEntryForm;
use crate::domain::a003_inbound::ui::list::InboundList;
use crate::usecases::u501_multi_entry::MultiEntryPage;
use crate::usecases::u502_bulk_upload::BulkUploadPage;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabDef {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

pub const INBOUND_LIST: &str = "a003_inbound";
pub const INBOUND_ENTRY: &str = "a003_inbound_entry";
pub const INBOUND_BATCHES: &str = "a003_inbound_batches";
pub const MULTI_ENTRY: &str = "u501_multi_entry";
pub const BULK_UPLOAD: &str = "u502_bulk_upload";

/// Menu order.
pub const TABS: [TabDef; 5] = [
    TabDef { key: INBOUND_LIST, title: "Inbound list", icon: "list" },
    TabDef { key: INBOUND_ENTRY, title: "Single entry", icon: "entry" },
    TabDef { key: MULTI_ENTRY, title: "Multi entry", icon: "grid" },
    TabDef { key: BULK_UPLOAD, title: "Bulk upload", icon: "upload" },
    TabDef { key: INBOUND_BATCHES, title: "Batches", icon: "batch" },
];

/// Tab opened on first start.
pub const HOME_TAB: &str = INBOUND_LIST;

pub fn tab_title(key: &str) -> Option<&'static str> {
    TABS.iter().find(|t| t.key == key).map(|t| t.title)
}

pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        INBOUND_LIST => view! { <InboundList /> }.into_any(),
        INBOUND_ENTRY => view! { <InboundEntryForm /> }.into_any(),
        INBOUND_BATCHES => view! { <BatchList /> }.into_any(),
        MULTI_ENTRY => view! { <MultiEntryPage /> }.into_any(),
        BULK_UPLOAD => view! { <BulkUploadPage /> }.into_any(),
        other => {
            log::warn!("no view registered for tab '{}'", other);
            view! { <div class="placeholder">{format!("Unknown page: {}", other)}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tab_keys_are_unique_and_titled() {
        let keys: HashSet<_> = TABS.iter().map(|t| t.key).collect();
        assert_eq!(keys.len(), TABS.len());
        assert_eq!(tab_title(MULTI_ENTRY), Some("Multi entry"));
        assert_eq!(tab_title(HOME_TAB), Some("Inbound list"));
        assert_eq!(tab_title("p900_sales_register"), None);
    }
}
