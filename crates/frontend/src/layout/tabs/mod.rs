//! Tabs: `registry` maps keys to titles and views, `page` hosts one tab.

pub mod page;
pub mod registry;

pub use page::TabPage;
pub use registry::{render_tab_content, tab_title, TabDef, TABS};
