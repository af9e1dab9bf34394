//! Top bar: sidebar toggle, title, warehouse selector, signed-in user.

use crate::domain::a001_warehouse::ui::WarehouseSelector;
use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::system::session;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let user = session::current_user();
    let user_label = user
        .as_ref()
        .map(|u| {
            if u.is_admin() {
                format!("{} (admin)", u.username)
            } else {
                u.username.clone()
            }
        })
        .unwrap_or_else(|| "Guest".to_string());
    let signed_in = user.is_some();

    let logout = move |_| {
        session::clear();
        if let Some(w) = web_sys::window() {
            let _ = w.location().reload();
        }
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_sidebar()
                    title=move || if ctx.sidebar_collapsed.get() { "Expand menu" } else { "Collapse menu" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Warehouse Inbound"</span>
            </div>

            <div class="top-header__actions">
                {icon("warehouse")}
                <WarehouseSelector />
                <div class="top-header__user">
                    <span>{user_label}</span>
                </div>
                {signed_in.then(|| view! {
                    <button class="top-header__icon-btn" on:click=logout title="Sign out">
                        {icon("logout")}
                    </button>
                })}
            </div>
        </div>
    }
}
