use crate::domain::a001_warehouse::store::ActiveWarehouseStore;
use crate::domain::a001_warehouse::WarehouseContext;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{registry::HOME_TAB, tab_title};
use crate::layout::Shell;
use crate::shared::notifications::{NoticeHost, Notifier};
use crate::shared::storage::BrowserStorage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(WarehouseContext::new(ActiveWarehouseStore::new(BrowserStorage)));
    provide_context(Notifier::new());

    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_router_integration(tab_title);
    if ctx.strip.with_untracked(|s| s.tabs.is_empty()) {
        if let Some(title) = tab_title(HOME_TAB) {
            ctx.open_tab(HOME_TAB, title);
        }
    }

    view! {
        <Shell />
        <NoticeHost />
    }
}
