//! Single inbound entry form.
//!
//! - view_model.rs: form state, save command and outcome handling
//! - view.rs: Leptos component

mod view;
mod view_model;

pub use view::InboundEntryForm;
