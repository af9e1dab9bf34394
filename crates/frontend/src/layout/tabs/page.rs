use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use leptos::prelude::*;

/// Content of one open tab. Inactive tabs stay mounted and are only hidden,
/// so unsaved grid rows survive switching tabs.
#[component]
pub fn TabPage(tab: Tab, ctx: AppGlobalContext) -> impl IntoView {
    let key = tab.key.clone();
    let active_key = key.clone();
    log::debug!("tab page created: '{}'", key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !ctx.is_active(&active_key)
            data-tab-key=key.clone()
        >
            {render_tab_content(&key)}
        </div>
    }
}
