pub mod state;

use self::state::BatchListState;
use crate::domain::a001_warehouse::use_warehouse;
use crate::domain::a003_inbound::api;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Upload batches of the active warehouse (all warehouses when none is
/// selected) with delete.
#[component]
pub fn BatchList() -> impl IntoView {
    let ctx = use_warehouse();
    let notifier = use_notifier();
    let state = RwSignal::new(BatchListState::default());
    let confirm_open = RwSignal::new(false);

    let load = move || {
        let warehouse_id = ctx.active_id_untracked();
        let Some(ticket) = state.try_update(|s| s.begin_load()) else {
            return;
        };
        spawn_local(async move {
            match api::fetch_batches(warehouse_id).await {
                Ok(items) => {
                    state.try_update(|s| s.apply(ticket, items));
                }
                Err(e) => {
                    if state.try_update(|s| s.fail(ticket)).unwrap_or(false) {
                        notifier.api_error(&e);
                    }
                }
            }
        });
    };

    Effect::new(move |_| {
        ctx.active_id();
        load();
    });

    // Thaw closes the dialog itself (Esc, backdrop click); drop the pending delete
    Effect::new(move |_| {
        if !confirm_open.get() {
            state.update(|s| s.cancel_delete());
        }
    });

    let ask_delete = move |batch_id: String| {
        state.update(|s| s.request_delete(&batch_id));
        if state.with_untracked(|s| s.pending_delete.is_some()) {
            confirm_open.set(true);
        }
    };

    let on_confirm = move |_| {
        let Some(batch_id) = state.try_update(|s| s.confirm_delete()).flatten() else {
            confirm_open.set(false);
            return;
        };
        confirm_open.set(false);
        spawn_local(async move {
            match api::delete_batch(&batch_id).await {
                Ok(()) => {
                    log::info!("batch {} deleted", batch_id);
                    notifier.success(format!("Batch {} deleted", batch_id));
                }
                Err(e) => notifier.api_error(&e),
            }
            state.try_update(|s| s.finish_delete());
            load();
        });
    };

    view! {
        <PageFrame page_id="a003_inbound_batches--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Batches"</h1>
                    <span class="page__subtitle">
                        {move || state.with(|s| format!("{} batches · {} rows", s.items.len(), s.total_rows()))}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || state.with(|s| s.is_loading))
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="table-wrapper">
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Batch"</th>
                                <th>"Rows"</th>
                                <th>"Last updated"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|b| b.batch_id.clone()
                                children=move |batch| {
                                    let id = batch.batch_id.clone();
                                    let busy_id = id.clone();
                                    view! {
                                        <tr>
                                            <td>{batch.batch_id.clone()}</td>
                                            <td>{batch.count}</td>
                                            <td>
                                                {batch.last_updated.as_deref().map(format_datetime).unwrap_or_default()}
                                            </td>
                                            <td>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| ask_delete(id.clone())
                                                    disabled=Signal::derive(move || {
                                                        state.with(|s| s.deleting.as_deref() == Some(busy_id.as_str()))
                                                    })
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || state.with(|s| s.is_loading)>
                        <div class="table-wrapper__loading">
                            <Spinner />
                        </div>
                    </Show>
                    <Show when=move || state.with(|s| !s.is_loading && s.items.is_empty())>
                        <div class="data-table__empty">"No batches"</div>
                    </Show>
                </div>
            </div>

            <Dialog open=confirm_open>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Delete batch"</DialogTitle>
                        <DialogContent>
                            {move || state.with(|s| {
                                format!(
                                    "Delete batch {} and all of its inbound records? This cannot be undone.",
                                    s.pending_delete.clone().unwrap_or_default()
                                )
                            })}
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| confirm_open.set(false)>
                                "Cancel"
                            </Button>
                            <Button appearance=ButtonAppearance::Primary on_click=on_confirm>
                                "Delete"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </PageFrame>
    }
}
