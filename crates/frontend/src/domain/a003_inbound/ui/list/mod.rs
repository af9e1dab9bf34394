pub mod state;

use self::state::{create_state, ExportPlan, FilterChange};
use crate::domain::a001_warehouse::ui::NoWarehouseSelected;
use crate::domain::a001_warehouse::use_warehouse;
use crate::domain::a003_inbound::api;
use crate::domain::a003_inbound::columns::{record_cell, INBOUND_LIST_COLUMNS, INBOUND_LIST_DEFAULTS};
use crate::shared::column_settings::{ColumnConfig, ColumnSettingsDialog};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{parse_input, to_input, today};
use crate::shared::export::export_csv;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::storage::{BrowserStorage, INBOUND_LIST_COLUMNS_KEY};
use contracts::domain::a003_inbound::{BatchSummary, InboundRecord};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn write_csv(rows: &[InboundRecord], columns: &[(&str, &str)]) -> Result<(), String> {
    let filename = format!("inbound_{}.csv", to_input(today()));
    export_csv(rows, columns, &filename)
}

#[component]
pub fn InboundList() -> impl IntoView {
    let ctx = use_warehouse();
    let notifier = use_notifier();
    let state = create_state();
    let columns = RwSignal::new(ColumnConfig::load(
        &BrowserStorage,
        INBOUND_LIST_COLUMNS_KEY,
        &INBOUND_LIST_COLUMNS,
        &INBOUND_LIST_DEFAULTS,
    ));
    let batches = RwSignal::new(Vec::<BatchSummary>::new());
    let show_columns = RwSignal::new(false);
    let exporting = RwSignal::new(false);

    let load = move || {
        let Some(warehouse_id) = ctx.active_id_untracked() else {
            return;
        };
        let Some((ticket, query)) = state.try_update(|s| s.begin_load(warehouse_id)) else {
            return;
        };
        spawn_local(async move {
            match api::fetch_page(&query).await {
                Ok(page) => {
                    state.try_update(|s| s.apply_page(ticket, page));
                }
                Err(e) => {
                    if state.try_update(|s| s.fail_load(ticket)).unwrap_or(false) {
                        notifier.api_error(&e);
                    }
                }
            }
        });
    };

    // Filter options: failures are only logged
    let load_options = move |warehouse_id: i64| {
        spawn_local(async move {
            match api::fetch_brands(warehouse_id).await {
                Ok(list) => {
                    state.try_update(|s| s.brands = list);
                }
                Err(e) => log::warn!("brand list unavailable: {}", e),
            }
            match api::fetch_categories(warehouse_id).await {
                Ok(list) => {
                    state.try_update(|s| s.categories = list);
                }
                Err(e) => log::warn!("category list unavailable: {}", e),
            }
            match api::fetch_batches(Some(warehouse_id)).await {
                Ok(list) => {
                    batches.try_set(list);
                }
                Err(e) => log::warn!("batch list unavailable: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        let warehouse_id = ctx.active_id();
        state.update(|s| {
            s.invalidate();
            s.clear_filters();
            s.brands.clear();
            s.categories.clear();
        });
        if let Some(id) = warehouse_id {
            load();
            load_options(id);
        }
    });

    let apply_filter = move |change: FilterChange| {
        if state.try_update(|s| s.set_filter(change)).unwrap_or(false) {
            load();
        }
    };

    let on_clear = move |_| {
        if state.try_update(|s| s.clear_filters()).unwrap_or(false) {
            load();
        }
    };

    let on_page_change = Callback::new(move |page: u32| {
        state.update(|s| s.set_page(page));
        load();
    });
    let on_page_size_change = Callback::new(move |size: u32| {
        state.update(|s| s.set_page_size(size));
        load();
    });

    let on_export = move |_| {
        let Some(warehouse_id) = ctx.active_id_untracked() else {
            return;
        };
        if exporting.get_untracked() {
            return;
        }
        let cols: Vec<(&'static str, &'static str)> = columns.with_untracked(|c| {
            c.visible_columns().iter().map(|d| (d.key, d.label)).collect()
        });
        match state.with_untracked(|s| s.export_plan(warehouse_id)) {
            ExportPlan::CurrentPage => {
                let result = state.with_untracked(|s| write_csv(&s.items, &cols));
                if let Err(msg) = result {
                    notifier.warning(msg);
                }
            }
            ExportPlan::Fetch(query) => {
                exporting.set(true);
                spawn_local(async move {
                    match api::fetch_page(&query).await {
                        Ok(page) => {
                            log::info!("export: {} of {} rows", page.data.len(), page.total);
                            if let Err(msg) = write_csv(&page.data, &cols) {
                                notifier.warning(msg);
                            }
                        }
                        Err(e) => notifier.api_error(&e),
                    }
                    exporting.try_set(false);
                });
            }
        }
    };

    let date_change = move |ev: leptos::ev::Event, start: bool| {
        let date = parse_input(&event_target_value(&ev));
        apply_filter(if start {
            FilterChange::StartDate(date)
        } else {
            FilterChange::EndDate(date)
        });
    };

    view! {
        <PageFrame page_id="a003_inbound--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inbound"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                        {move || state.with(|s| s.total.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_columns.set(true)>
                        {icon("settings")}
                        " Columns"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_export disabled=exporting>
                        {icon("download")}
                        {move || if exporting.get() { " Exporting..." } else { " Export" }}
                    </Button>
                </div>
            </div>

            <Show when=move || ctx.active_id().is_some() fallback=|| view! { <NoWarehouseSelected /> }>
                <div class="filter-panel">
                    <input
                        type="search"
                        class="filter-panel__search"
                        placeholder="Search WSN, product, vehicle..."
                        prop:value=move || state.with(|s| s.filters.search.clone())
                        on:change=move |ev| apply_filter(FilterChange::Search(event_target_value(&ev)))
                    />
                    <select
                        prop:value=move || state.with(|s| s.filters.brand.clone())
                        on:change=move |ev| apply_filter(FilterChange::Brand(event_target_value(&ev)))
                    >
                        <option value="">"All brands"</option>
                        {move || state.with(|s| {
                            s.brands
                                .iter()
                                .map(|b| view! { <option value=b.clone()>{b.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <select
                        prop:value=move || state.with(|s| s.filters.category.clone())
                        on:change=move |ev| apply_filter(FilterChange::Category(event_target_value(&ev)))
                    >
                        <option value="">"All categories"</option>
                        {move || state.with(|s| {
                            s.categories
                                .iter()
                                .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <label class="filter-panel__date">
                        "From"
                        <input
                            type="date"
                            prop:value=move || state.with(|s| s.filters.start_date.map(to_input).unwrap_or_default())
                            on:change=move |ev| date_change(ev, true)
                        />
                    </label>
                    <label class="filter-panel__date">
                        "To"
                        <input
                            type="date"
                            prop:value=move || state.with(|s| s.filters.end_date.map(to_input).unwrap_or_default())
                            on:change=move |ev| date_change(ev, false)
                        />
                    </label>
                    <select
                        prop:value=move || state.with(|s| s.filters.batch_id.clone().unwrap_or_default())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            apply_filter(FilterChange::Batch((!value.is_empty()).then_some(value)));
                        }
                    >
                        <option value="">"All batches"</option>
                        {move || batches.with(|list| {
                            list.iter()
                                .map(|b| {
                                    view! {
                                        <option value=b.batch_id.clone()>
                                            {format!("{} ({})", b.batch_id, b.count)}
                                        </option>
                                    }
                                })
                                .collect_view()
                        })}
                    </select>
                    <Button appearance=ButtonAppearance::Subtle on_click=on_clear>
                        {icon("x")}
                        " Clear"
                    </Button>
                </div>

                <div class="page__content">
                    <div class="table-wrapper">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    {move || {
                                        columns
                                            .with(|c| c.visible_columns())
                                            .into_iter()
                                            .map(|d| view! { <th>{d.label}</th> })
                                            .collect_view()
                                    }}
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let keys = columns.with(|c| c.visible_keys().to_vec());
                                    state.with(|s| {
                                        if s.items.is_empty() && !s.is_loading {
                                            return view! {
                                                <tr>
                                                    <td class="data-table__empty" colspan=keys.len()>
                                                        "No inbound records"
                                                    </td>
                                                </tr>
                                            }
                                            .into_any();
                                        }
                                        s.items
                                            .iter()
                                            .map(|record| {
                                                view! {
                                                    <tr>
                                                        {keys
                                                            .iter()
                                                            .map(|k| view! { <td>{record_cell(record, k)}</td> })
                                                            .collect_view()}
                                                    </tr>
                                                }
                                            })
                                            .collect_view()
                                            .into_any()
                                    })
                                }}
                            </tbody>
                        </table>
                        <Show when=move || state.with(|s| s.is_loading)>
                            <div class="table-wrapper__loading">
                                <Spinner />
                            </div>
                        </Show>
                    </div>

                    <PaginationControls
                        current_page=Signal::derive(move || state.with(|s| s.page))
                        total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                        total_count=Signal::derive(move || state.with(|s| s.total))
                        page_size=Signal::derive(move || state.with(|s| s.page_size))
                        on_page_change=on_page_change
                        on_page_size_change=on_page_size_change
                    />
                </div>
            </Show>

            <ColumnSettingsDialog open=show_columns columns=columns storage_key=INBOUND_LIST_COLUMNS_KEY />
        </PageFrame>
    }
}
