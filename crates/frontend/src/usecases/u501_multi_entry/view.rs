use super::api;
use super::grid::{
    CommonFields, GridField, LookupTicket, MultiEntryGrid, RowKey, RowStatus, MAX_ROWS,
    ROW_BATCHES,
};
use super::navigation::{cell_dom_id, CellPos};
use crate::domain::a001_warehouse::ui::NoWarehouseSelected;
use crate::domain::a001_warehouse::use_warehouse;
use crate::domain::a002_master_data::api as master_data;
use crate::domain::a003_inbound::api as inbound_api;
use crate::domain::a003_inbound::columns::{MULTI_ENTRY_COLUMNS, MULTI_ENTRY_DEFAULTS};
use crate::shared::column_settings::{ColumnConfig, ColumnSettingsDialog};
use crate::shared::date_utils::{parse_input, to_input, today};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_USECASE};
use crate::shared::storage::{
    BrowserStorage, KeyValueStorage, LAST_VEHICLE_KEY, MULTI_ENTRY_COLUMNS_KEY,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

/// Visible columns that take keyboard focus, in display order.
fn editable_keys(columns: &ColumnConfig) -> Vec<&'static str> {
    columns
        .visible_keys()
        .iter()
        .copied()
        .filter(|k| GridField::from_key(k).is_some())
        .collect()
}

fn focus_cell(pos: CellPos) {
    let id = cell_dom_id(pos.row, pos.col);
    spawn_local(async move {
        // An appended row is in the DOM only after the current tick.
        gloo_timers::future::TimeoutFuture::new(0).await;
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(el) = element {
            let _ = el.focus();
        }
    });
}

#[component]
pub fn MultiEntryPage() -> impl IntoView {
    let ctx = use_warehouse();

    view! {
        <PageFrame page_id="u501_multi_entry--usecase" category=PAGE_CAT_USECASE>
            {move || match ctx.active_id() {
                Some(id) => view! { <MultiEntryWorkspace warehouse_id=id /> }.into_any(),
                None => view! { <NoWarehouseSelected /> }.into_any(),
            }}
        </PageFrame>
    }
}

/// Rebuilt whenever the active warehouse changes, which drops the draft rows
/// and reloads the rack list.
#[component]
fn MultiEntryWorkspace(warehouse_id: i64) -> impl IntoView {
    let ctx = use_warehouse();
    let notifier = use_notifier();

    let grid = RwSignal::new(MultiEntryGrid::new(CommonFields {
        inbound_date: today(),
        vehicle_no: BrowserStorage.get(LAST_VEHICLE_KEY).unwrap_or_default(),
    }));
    let columns = RwSignal::new(ColumnConfig::load(
        &BrowserStorage,
        MULTI_ENTRY_COLUMNS_KEY,
        &MULTI_ENTRY_COLUMNS,
        &MULTI_ENTRY_DEFAULTS,
    ));
    let racks = RwSignal::new(Vec::<String>::new());
    let submitting = RwSignal::new(false);
    let show_columns = RwSignal::new(false);

    // Reference data: stored WSNs and the warehouse racks
    spawn_local(async move {
        match inbound_api::fetch_existing_wsns().await {
            Ok(wsns) => {
                log::info!("multi-entry: {} stored WSNs loaded", wsns.len());
                grid.try_update(|g| g.set_existing_wsns(wsns));
            }
            Err(e) => notifier.api_error(&e),
        }
    });
    spawn_local(async move {
        match inbound_api::fetch_racks(warehouse_id).await {
            Ok(list) => {
                racks.try_set(list);
            }
            Err(e) => notifier.api_error(&e),
        }
    });

    let lookup = move |ticket: LookupTicket| {
        spawn_local(async move {
            match master_data::fetch_by_wsn(&ticket.wsn).await {
                Ok(Some(record)) => {
                    grid.try_update(|g| g.apply_master_data(&ticket, record.fields));
                }
                Ok(None) => log::debug!("no master data for WSN {}", ticket.wsn),
                Err(e) => notifier.api_error(&e),
            }
        });
    };

    let edit = move |key: RowKey, field: GridField, value: String| {
        let outcome = grid
            .try_update(|g| g.index_of(key).map(|i| g.update_cell(i, field, &value)))
            .flatten();
        match outcome {
            Some(Ok(Some(ticket))) => lookup(ticket),
            Some(Err(e)) => notifier.warning(e.to_string()),
            _ => {}
        }
    };

    let on_enter = move |ev: leptos::ev::KeyboardEvent, key: RowKey, field: GridField, col: usize| {
        if ev.key() != "Enter" {
            return;
        }
        ev.prevent_default();
        // Commit before moving; re-rendering would otherwise reset the input.
        edit(key, field, event_target_value(&ev));
        let width = columns.with_untracked(|c| editable_keys(c).len());
        let target = grid
            .try_update(|g| {
                g.index_of(key)
                    .map(|row| g.commit_move(CellPos { row, col }, width))
            })
            .flatten();
        if let Some(pos) = target {
            focus_cell(pos);
        }
    };

    let add_rows = move |n: usize| {
        let added = grid.try_update(|g| g.add_rows(n)).unwrap_or(0);
        if added < n {
            notifier.warning(format!("The grid holds at most {} rows", MAX_ROWS));
        }
    };

    let on_common_date = move |ev: leptos::ev::Event| match parse_input(&event_target_value(&ev)) {
        Some(date) => grid.update(|g| g.set_common_date(date)),
        None => notifier.warning("Enter the date as YYYY-MM-DD"),
    };

    let on_common_vehicle = move |ev: leptos::ev::Event| {
        let vehicle = event_target_value(&ev).trim().to_string();
        BrowserStorage.set(LAST_VEHICLE_KEY, &vehicle);
        grid.update(|g| g.set_common_vehicle(&vehicle));
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let plan = match grid.with_untracked(|g| g.prepare_submit(ctx.active_id_untracked())) {
            Ok(plan) => plan,
            Err(e) => {
                notifier.warning(e.to_string());
                return;
            }
        };
        submitting.set(true);
        spawn_local(async move {
            match api::submit(&plan.request).await {
                Ok(response) => {
                    let summary = grid
                        .try_update(|g| g.apply_results(&plan, &response))
                        .unwrap_or_default();
                    log::info!(
                        "multi-entry: {} saved, {} failed (server count {})",
                        summary.saved,
                        summary.failed,
                        response.success_count
                    );
                    if summary.failed == 0 {
                        notifier.success(format!("{} entries saved", summary.saved));
                    } else {
                        notifier.warning(format!(
                            "{} saved, {} failed. Failed rows are marked in the grid",
                            summary.saved, summary.failed
                        ));
                    }
                }
                Err(e) => notifier.api_error(&e),
            }
            submitting.try_set(false);
        });
    };

    let on_reset = move |_| grid.update(|g| g.reset());

    let row_keys = move || grid.with(|g| g.rows().iter().map(|r| r.key).collect::<Vec<_>>());

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">"Multi entry"</h1>
                <span class="page__subtitle">
                    {move || grid.with(|g| {
                        format!(
                            "{} rows · {} to save · {} duplicate WSNs · {} stored",
                            g.len(),
                            g.pending_count(),
                            g.duplicate_wsns().len(),
                            g.existing_wsn_count(),
                        )
                    })}
                </span>
            </div>
            <div class="page__header-right">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_columns.set(true)>
                    {icon("settings")}
                    " Columns"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=on_reset disabled=submitting>
                    "Reset"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=on_submit disabled=submitting>
                    {move || if submitting.get() { "Saving..." } else { "Save all" }}
                </Button>
            </div>
        </div>

        <div class="page__content">
            <div class="me-common">
                <label class="me-common__field">
                    <span>"Inbound date"</span>
                    <input
                        type="date"
                        prop:value=move || grid.with(|g| to_input(g.common().inbound_date))
                        on:change=on_common_date
                    />
                </label>
                <label class="me-common__field">
                    <span>"Vehicle no"</span>
                    <input
                        type="text"
                        prop:value=move || grid.with(|g| g.common().vehicle_no.clone())
                        on:change=on_common_vehicle
                    />
                </label>
                <div class="me-common__add">
                    {ROW_BATCHES
                        .iter()
                        .map(|&n| {
                            view! {
                                <Button appearance=ButtonAppearance::Subtle on_click=move |_| add_rows(n)>
                                    {format!("+{} rows", n)}
                                </Button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="table-wrapper">
                <table class="me-table">
                    <thead>
                        <tr>
                            <th class="me-table__num">"#"</th>
                            {move || {
                                columns
                                    .with(|c| c.visible_columns())
                                    .into_iter()
                                    .map(|def| view! { <th>{def.label}</th> })
                                    .collect_view()
                            }}
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=row_keys
                            key=|k| *k
                            children=move |key: RowKey| {
                                let row_class = move || {
                                    grid.with(|g| match g.row_by_key(key).map(|r| &r.status) {
                                        Some(RowStatus::Saved) => "me-row me-row--saved",
                                        Some(RowStatus::Failed(_)) => "me-row me-row--failed",
                                        _ if g.is_duplicate_key(key) => "me-row me-row--duplicate",
                                        _ => "me-row",
                                    })
                                };
                                let status_text = move || {
                                    grid.with(|g| match g.row_by_key(key).map(|r| &r.status) {
                                        Some(RowStatus::Saved) => "Saved",
                                        Some(RowStatus::Failed(_)) => "Failed",
                                        _ if g.is_already_stored(key) => "Already stored",
                                        _ if g.is_duplicate_key(key) => "Duplicate",
                                        _ => "",
                                    })
                                };
                                let status_title = move || {
                                    grid.with(|g| match g.row_by_key(key).map(|r| &r.status) {
                                        Some(RowStatus::Failed(reason)) => reason.clone(),
                                        _ => String::new(),
                                    })
                                };
                                let saved = move || {
                                    grid.with(|g| g.row_by_key(key).map(|r| r.is_saved()).unwrap_or(false))
                                };

                                view! {
                                    <tr class=row_class>
                                        <td class="me-table__num">
                                            {move || grid.with(|g| g.index_of(key).map(|i| i + 1).unwrap_or(0))}
                                        </td>
                                        {move || {
                                            let visible = columns.with(|c| c.visible_columns());
                                            let editable = columns.with(editable_keys);
                                            visible
                                                .into_iter()
                                                .map(|def| {
                                                    let col_key = def.key;
                                                    let text = move || {
                                                        grid.with(|g| {
                                                            g.row_by_key(key)
                                                                .map(|r| r.cell_text(col_key))
                                                                .unwrap_or_default()
                                                        })
                                                    };
                                                    let Some(field) = GridField::from_key(col_key) else {
                                                        return view! {
                                                            <td class="me-cell me-cell--readonly">{text}</td>
                                                        }
                                                        .into_any();
                                                    };
                                                    let col = editable
                                                        .iter()
                                                        .position(|k| *k == col_key)
                                                        .unwrap_or(0);
                                                    let dom_id = move || {
                                                        grid.with(|g| g.index_of(key))
                                                            .map(|row| cell_dom_id(row, col))
                                                            .unwrap_or_default()
                                                    };
                                                    let input_type = if field == GridField::InboundDate {
                                                        "date"
                                                    } else {
                                                        "text"
                                                    };
                                                    view! {
                                                        <td class="me-cell">
                                                            <input
                                                                class="me-input"
                                                                type=input_type
                                                                id=dom_id
                                                                list=(field == GridField::RackNo).then_some("me-racks")
                                                                prop:value=text
                                                                disabled=saved
                                                                on:change=move |ev| edit(key, field, event_target_value(&ev))
                                                                on:keydown=move |ev| on_enter(ev, key, field, col)
                                                            />
                                                        </td>
                                                    }
                                                    .into_any()
                                                })
                                                .collect_view()
                                        }}
                                        <td class="me-cell me-cell--status" title=status_title>
                                            {status_text}
                                        </td>
                                        <td class="me-cell">
                                            <button
                                                class="me-remove"
                                                title="Remove row"
                                                disabled=saved
                                                on:click=move |_| {
                                                    grid.update(|g| {
                                                        if let Some(i) = g.index_of(key) {
                                                            g.remove_row(i);
                                                        }
                                                    })
                                                }
                                            >
                                                {icon("x")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <datalist id="me-racks">
                {move || {
                    racks
                        .get()
                        .into_iter()
                        .map(|rack| view! { <option value=rack></option> })
                        .collect_view()
                }}
            </datalist>
        </div>

        <ColumnSettingsDialog open=show_columns columns=columns storage_key=MULTI_ENTRY_COLUMNS_KEY />
    }
}
