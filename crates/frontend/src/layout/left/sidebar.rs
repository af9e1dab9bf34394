//! Navigation menu; each item opens (or focuses) its tab.

use crate::layout::global_context::use_global_context;
use crate::layout::tabs::TABS;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let collapsed = move || ctx.sidebar_collapsed.get();

    view! {
        <nav
            data-zone="left"
            class="app-sidebar"
            class:app-sidebar--collapsed=collapsed
        >
            <div class="app-sidebar__content">
                {TABS
                    .iter()
                    .map(|def| {
                        let def = *def;
                        view! {
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || ctx.is_active(def.key)
                                title=def.title
                                on:click=move |_| ctx.open_tab(def.key, def.title)
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(def.icon)}
                                    <Show when=move || !collapsed()>
                                        <span>{def.title}</span>
                                    </Show>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}
