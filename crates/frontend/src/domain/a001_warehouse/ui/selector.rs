use crate::domain::a001_warehouse::api;
use crate::domain::a001_warehouse::use_warehouse;
use crate::shared::notifications::use_notifier;
use contracts::domain::a001_warehouse::Warehouse;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Active warehouse picker in the top bar.
#[component]
pub fn WarehouseSelector() -> impl IntoView {
    let ctx = use_warehouse();
    let notifier = use_notifier();
    let (warehouses, set_warehouses) = signal(Vec::<Warehouse>::new());
    let (loading, set_loading) = signal(false);

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_warehouses().await {
                Ok(list) => {
                    // A stored selection that no longer exists server-side is dropped.
                    if let Some(active) = ctx.get_active_untracked() {
                        if !list.iter().any(|w| w.id == active.id) {
                            log::warn!("active warehouse {} no longer listed", active.id);
                            ctx.set_active(None);
                        }
                    }
                    set_warehouses.set(list);
                }
                Err(e) => notifier.api_error(&e),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let picked = value
            .parse::<i64>()
            .ok()
            .and_then(|id| warehouses.with_untracked(|list| list.iter().find(|w| w.id == id).cloned()));
        ctx.set_active(picked);
    };

    view! {
        <div class="warehouse-selector">
            <select
                class="warehouse-selector__select"
                disabled=move || loading.get()
                prop:value=move || ctx.active_id().map(|id| id.to_string()).unwrap_or_default()
                on:change=on_change
            >
                <option value="">"— Select warehouse —"</option>
                <For
                    each=move || warehouses.get()
                    key=|w| w.id
                    children=move |w: Warehouse| {
                        let id = w.id;
                        view! {
                            <option
                                value=id.to_string()
                                selected=move || ctx.active_id() == Some(id)
                                disabled=!w.is_active
                            >
                                {w.display_name()}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
