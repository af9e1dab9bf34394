use super::api;
use super::poll::{check_file_name, next_step, PollStep};
use crate::domain::a001_warehouse::ui::NoWarehouseSelected;
use crate::domain::a001_warehouse::use_warehouse;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifier;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_USECASE};
use contracts::usecases::u502_bulk_upload::{UploadProgress, UploadStatus};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn status_label(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Queued => "Queued",
        UploadStatus::Processing => "Processing",
        UploadStatus::Completed => "Completed",
        UploadStatus::Failed => "Failed",
    }
}

#[component]
pub fn BulkUploadPage() -> impl IntoView {
    let ctx = use_warehouse();
    let notifier = use_notifier();

    let file_input = NodeRef::<html::Input>::new();
    let (file_name, set_file_name) = signal(None::<String>);
    let (uploading, set_uploading) = signal(false);
    let (progress, set_progress) = signal(None::<UploadProgress>);
    // Batch currently being polled; a new upload supersedes the old loop.
    let polling = RwSignal::new(None::<String>);

    let start_polling = move |batch_id: String| {
        polling.set(Some(batch_id.clone()));
        let interval = config().upload_poll_interval_ms;
        spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(interval).await;
                if polling.try_get_untracked().flatten().as_deref() != Some(batch_id.as_str()) {
                    break;
                }
                match next_step(api::fetch_progress(&batch_id).await) {
                    PollStep::Continue(p) => {
                        set_progress.try_set(Some(p));
                    }
                    PollStep::Finished(p) => {
                        log::info!(
                            "bulk upload {}: {:?}, {} ok / {} errors",
                            p.batch_id,
                            p.status,
                            p.success_rows,
                            p.error_rows
                        );
                        if p.status == UploadStatus::Completed {
                            notifier.success(format!("Upload finished: {} rows imported", p.success_rows));
                        } else {
                            notifier.error(
                                p.message.clone().unwrap_or_else(|| "Upload failed".to_string()),
                            );
                        }
                        set_progress.try_set(Some(p));
                        break;
                    }
                    PollStep::Vanished => {
                        log::debug!("bulk upload {}: progress no longer available", batch_id);
                        break;
                    }
                    PollStep::Abort(e) => {
                        notifier.api_error(&e);
                        break;
                    }
                }
            }
            polling.try_update(|current| {
                if current.as_deref() == Some(batch_id.as_str()) {
                    *current = None;
                }
            });
        });
    };

    let on_file_change = move |_| {
        let name = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(|file| file.name());
        set_file_name.set(name);
    };

    let on_upload = move |_| {
        if uploading.get_untracked() {
            return;
        }
        let Some(warehouse_id) = ctx.active_id_untracked() else {
            notifier.warning("Select a warehouse first");
            return;
        };
        let Some(file) = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            notifier.warning("Choose a file to upload");
            return;
        };
        if let Err(msg) = check_file_name(&file.name()) {
            notifier.warning(msg);
            return;
        }

        set_uploading.set(true);
        set_progress.set(None);
        spawn_local(async move {
            match api::upload(&file, warehouse_id).await {
                Ok(response) => {
                    notifier.success(format!(
                        "Batch {} accepted: {} rows queued",
                        response.batch_id, response.total_rows
                    ));
                    set_progress.try_set(Some(UploadProgress {
                        batch_id: response.batch_id.clone(),
                        status: UploadStatus::Queued,
                        processed_rows: 0,
                        total_rows: response.total_rows,
                        success_rows: 0,
                        error_rows: 0,
                        message: None,
                    }));
                    start_polling(response.batch_id);
                }
                Err(e) => notifier.api_error(&e),
            }
            set_uploading.try_set(false);
        });
    };

    view! {
        <PageFrame page_id="u502_bulk_upload--usecase" category=PAGE_CAT_USECASE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Bulk upload"</h1>
                </div>
            </div>

            <Show when=move || ctx.active_id().is_some() fallback=|| view! { <NoWarehouseSelected /> }>
                <div class="page__content">
                    <Flex vertical=false gap=FlexGap::Large align=FlexAlign::Center>
                        <label class="upload__picker">
                            {icon("upload")}
                            <span>
                                {move || file_name.get().unwrap_or_else(|| "Choose .xlsx, .xls or .csv".to_string())}
                            </span>
                            <input
                                node_ref=file_input
                                type="file"
                                accept=".xlsx,.xls,.csv"
                                class="upload__input"
                                on:change=on_file_change
                            />
                        </label>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_upload
                            disabled=Signal::derive(move || uploading.get() || polling.with(|p| p.is_some()))
                        >
                            {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                        </Button>
                    </Flex>

                    {move || progress.get().map(|p| {
                        let pct = p.percent();
                        let title = format!("Batch {}", p.batch_id);
                        let status = status_label(p.status);
                        let running = !p.is_finished();
                        view! {
                            <div class="upload__progress">
                                <Flex vertical=false gap=FlexGap::Medium align=FlexAlign::Center>
                                    <strong>{title}</strong>
                                    <Badge>{status}</Badge>
                                    {running.then(|| view! { <Spinner /> })}
                                </Flex>
                                <div class="progress-bar">
                                    <div class="progress-bar__fill" style=format!("width:{}%", pct)></div>
                                </div>
                                <div class="upload__counts">
                                    {format!(
                                        "{} / {} rows processed ({}%) · {} ok · {} errors",
                                        p.processed_rows,
                                        p.total_rows,
                                        pct,
                                        p.success_rows,
                                        p.error_rows,
                                    )}
                                </div>
                                {p.message.clone().map(|m| view! { <div class="upload__message">{m}</div> })}
                            </div>
                        }
                    })}
                </div>
            </Show>
        </PageFrame>
    }
}
