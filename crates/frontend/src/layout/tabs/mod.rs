//! Tab contents
//!
//! - `page`: wrapper showing a tab's content while it is active
//! - `registry`: tab key to screen
//! - `tab_labels`: tab key to title

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;
