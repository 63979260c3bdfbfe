//! Create / batch-edit dialog driven by field metadata

pub mod state;
pub mod widget;

pub use state::{DialogSubmit, RecordDialogState};
pub use widget::RecordDialog;
