pub mod confirm_dialog;
pub mod date_input;
pub mod table_checkbox;
