pub mod date;
pub mod form;
pub mod metadata;
