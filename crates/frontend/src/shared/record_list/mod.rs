//! Generic list/grid controller shared by every entity screen

pub mod delete;
pub mod page;
pub mod references;
pub mod state;
pub mod summary;

use contracts::shared::metadata::ReferenceList;
use std::collections::BTreeMap;

/// Option values of the loaded reference lists
pub type ReferenceOptions = BTreeMap<ReferenceList, Vec<String>>;

pub use page::RecordListPage;
pub use references::load_reference;
pub use summary::{refresh_summary, LatestRecordCard, SummaryCard, SummaryState};
