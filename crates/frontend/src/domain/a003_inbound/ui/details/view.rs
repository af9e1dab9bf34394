use super::view_model::InboundEntryViewModel;
use crate::domain::a001_warehouse::ui::NoWarehouseSelected;
use crate::domain::a001_warehouse::use_warehouse;
use crate::domain::a003_inbound::api;
use crate::shared::date_utils::{format_date, parse_input, to_input};
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::a002_master_data::aggregate::MASTER_DATA_KEYS;
use contracts::domain::a003_inbound::InboundEntry;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn master_label(key: &str) -> &'static str {
    match key {
        "fsn" => "FSN",
        "product_title" => "Product",
        "brand" => "Brand",
        "mrp" => "MRP",
        "fsp" => "FSP",
        "hsn_sac" => "HSN/SAC",
        "igst_rate" => "IGST %",
        "cms_vertical" => "Category",
        "fkt_link" => "Link",
        "wid" => "WID",
        _ => "",
    }
}

#[component]
pub fn InboundEntryForm() -> impl IntoView {
    let ctx = use_warehouse();
    let notifier = use_notifier();
    let vm = InboundEntryViewModel::new();
    let racks = RwSignal::new(Vec::<String>::new());

    Effect::new(move |_| {
        let Some(warehouse_id) = ctx.active_id() else {
            racks.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match api::fetch_racks(warehouse_id).await {
                Ok(list) => {
                    racks.try_set(list);
                }
                Err(e) => notifier.api_error(&e),
            }
        });
    });

    let on_save = move |_| vm.save(ctx.active_id_untracked(), false, notifier);
    let on_overwrite = move |_| {
        vm.conflict.set(None);
        vm.save(ctx.active_id_untracked(), true, notifier);
    };

    let text_field = move |label: &'static str,
                           read: fn(&InboundEntry) -> String,
                           write: fn(&mut InboundEntry, String)| {
        view! {
            <label class="form__field">
                <span class="form__label">{label}</span>
                <input
                    type="text"
                    class="form__input"
                    prop:value=move || vm.form.with(read)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.edit(|f| write(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <PageFrame page_id="a003_inbound--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inbound entry"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.reset()>
                        "Clear"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save disabled=vm.saving>
                        {move || if vm.saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                </div>
            </div>

            <Show when=move || ctx.active_id().is_some() fallback=|| view! { <NoWarehouseSelected /> }>
                <div class="page__content">
                    {move || vm.error.get().map(|msg| view! { <div class="form__error">{msg}</div> })}

                    {move || vm.conflict.get().map(|conflict| {
                        let existing = conflict.existing.clone();
                        view! {
                            <div class="form__conflict">
                                <strong>
                                    {conflict.message.clone().unwrap_or_else(|| "WSN already exists".to_string())}
                                </strong>
                                {existing.map(|r| view! {
                                    <div class="form__conflict-record">
                                        {format!(
                                            "#{} · {} · rack {} · vehicle {} · created {}",
                                            r.id,
                                            r.entry.inbound_date.format("%d.%m.%Y"),
                                            r.entry.rack_no,
                                            r.entry.vehicle_no,
                                            format_date(&r.created_at),
                                        )}
                                    </div>
                                })}
                                <Flex gap=FlexGap::Small>
                                    <Button appearance=ButtonAppearance::Primary on_click=on_overwrite>
                                        "Update existing"
                                    </Button>
                                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.conflict.set(None)>
                                        "Cancel"
                                    </Button>
                                </Flex>
                            </div>
                        }
                    })}

                    <div class="form">
                        <label class="form__field">
                            <span class="form__label">"WSN *"</span>
                            <input
                                type="text"
                                class="form__input"
                                prop:value=move || vm.form.with(|f| f.wsn.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    vm.edit(|f| f.wsn = value);
                                }
                                on:blur=move |_| vm.lookup_master_data()
                            />
                        </label>
                        <label class="form__field">
                            <span class="form__label">"Inbound date"</span>
                            <input
                                type="date"
                                class="form__input"
                                prop:value=move || vm.form.with(|f| to_input(f.inbound_date))
                                on:change=move |ev| match parse_input(&event_target_value(&ev)) {
                                    Some(date) => vm.edit(|f| f.inbound_date = date),
                                    None => vm.error.set(Some("Enter the date as YYYY-MM-DD".to_string())),
                                }
                            />
                        </label>
                        {text_field("Vehicle no", |f| f.vehicle_no.clone(), |f, v| f.vehicle_no = v)}
                        {text_field("Serial no", |f| f.product_serial_number.clone(), |f, v| f.product_serial_number = v)}
                        <label class="form__field">
                            <span class="form__label">"Rack"</span>
                            <input
                                type="text"
                                class="form__input"
                                list="entry-racks"
                                prop:value=move || vm.form.with(|f| f.rack_no.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    vm.edit(|f| f.rack_no = value);
                                }
                            />
                            <datalist id="entry-racks">
                                {move || racks.get().into_iter().map(|r| view! { <option value=r></option> }).collect_view()}
                            </datalist>
                        </label>
                        {text_field("Unload remarks", |f| f.unload_remarks.clone(), |f, v| f.unload_remarks = v)}
                    </div>

                    <Show when=move || vm.form.with(|f| !f.master.is_empty())>
                        <div class="form__preview">
                            <h3>"Master data"</h3>
                            <dl>
                                {MASTER_DATA_KEYS
                                    .iter()
                                    .map(|key| {
                                        let key = *key;
                                        view! {
                                            <dt>{master_label(key)}</dt>
                                            <dd>
                                                {move || vm.form.with(|f| f.master.field_text(key).unwrap_or_else(|| "-".to_string()))}
                                            </dd>
                                        }
                                    })
                                    .collect_view()}
                            </dl>
                        </div>
                    </Show>
                </div>
            </Show>
        </PageFrame>
    }
}
