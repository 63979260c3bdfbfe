pub mod api_utils;
pub mod components;
pub mod config;
pub mod csv_importer;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod record_api;
pub mod record_dialog;
pub mod record_list;
pub mod toast;
