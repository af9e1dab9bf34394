//! Transient notices (toasts). Every failed network action ends here.

use crate::shared::config::config;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Info => "notice notice--info",
            NoticeKind::Warning => "notice notice--warning",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    items: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn push(&self, kind: NoticeKind, text: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.update(|items| {
            items.push(Notice {
                id,
                kind,
                text: text.into(),
            })
        });

        let items = self.items;
        let ttl = config().notice_ttl_ms;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(ttl).await;
            items.update(|items| items.retain(|n| n.id != id));
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NoticeKind::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text);
    }

    pub fn api_error(&self, err: &ApiError) {
        self.push(NoticeKind::Error, err.user_message());
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not provided")
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="notice-host">
            <For
                each=move || notifier.items.get()
                key=|n| n.id
                children=move |n: Notice| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class() on:click=move |_| notifier.dismiss(id)>
                            {n.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
