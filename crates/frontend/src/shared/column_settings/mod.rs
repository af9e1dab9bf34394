pub mod config;

pub use config::{ColumnConfig, ColumnDef};

use crate::shared::storage::BrowserStorage;
use leptos::prelude::*;
use thaw::*;

/// Column picker dialog. Every change is saved immediately.
#[component]
pub fn ColumnSettingsDialog(
    open: RwSignal<bool>,
    columns: RwSignal<ColumnConfig>,
    /// localStorage key of this context (`multiEntryColumns`, `inboundListColumns`)
    storage_key: &'static str,
) -> impl IntoView {
    let persist = move || columns.with_untracked(|c| c.save(&BrowserStorage, storage_key));

    let toggle = move |key: &'static str| {
        let changed = columns.try_update(|c| c.toggle(key)).unwrap_or(false);
        if changed {
            persist();
        }
    };

    let show_all = move |_| {
        columns.update(|c| *c = ColumnConfig::all(c.master()));
        persist();
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Columns"</DialogTitle>
                    <DialogContent>
                        <div class="column-settings">
                            {move || {
                                columns
                                    .with(|c| c.master().to_vec())
                                    .into_iter()
                                    .map(|def| {
                                        let key = def.key;
                                        view! {
                                            <label class="column-settings__item">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || columns.with(|c| c.is_visible(key))
                                                    disabled=def.locked
                                                    on:change=move |_| toggle(key)
                                                />
                                                <span>{def.label}</span>
                                            </label>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=show_all>
                            "Show all"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| open.set(false)>
                            "Done"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
