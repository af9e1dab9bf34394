use crate::shared::icons::icon;
use leptos::prelude::*;

/// Rendered instead of a warehouse-scoped page while nothing is selected.
#[component]
pub fn NoWarehouseSelected() -> impl IntoView {
    view! {
        <div class="placeholder">
            {icon("warehouse")}
            <h2 class="placeholder__title">"No warehouse selected"</h2>
            <p class="placeholder__text">
                "Pick a warehouse in the top bar to work with inbound records."
            </p>
        </div>
    }
}
