//! Tab bar and the stack of open tab pages.

use crate::layout::global_context::{use_global_context, Tab};
use crate::layout::tabs::TabPage;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_global_context();
    let tabs = move || ctx.strip.with(|s| s.tabs.clone());

    view! {
        <div data-zone="center" class="app-tabs">
            <div class="tabs__bar">
                <For
                    each=tabs
                    key=|tab| tab.key.clone()
                    children=move |tab: Tab| {
                        let key = tab.key.clone();
                        let key_active = key.clone();
                        let key_close = key.clone();
                        view! {
                            <div
                                class="tabs__tab"
                                class:tabs__tab--active=move || ctx.is_active(&key_active)
                                on:click=move |_| ctx.activate_tab(&key)
                            >
                                <span class="tabs__title">{tab.title.clone()}</span>
                                <button
                                    class="tabs__close"
                                    title="Close"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        ctx.close_tab(&key_close);
                                    }
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
            <div class="tabs__content">
                <For
                    each=tabs
                    key=|tab| tab.key.clone()
                    children=move |tab: Tab| view! { <TabPage tab=tab ctx=ctx /> }
                />
            </div>
        </div>
    }
}
