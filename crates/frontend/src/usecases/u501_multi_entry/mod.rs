pub mod api;
pub mod duplicates;
pub mod grid;
pub mod navigation;
pub mod view;

pub use view::MultiEntryPage;
