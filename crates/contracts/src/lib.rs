//! Types shared by the console: records, DTOs, field metadata, validation.

pub mod domain;
pub mod projections;
pub mod shared;
