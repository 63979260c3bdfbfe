use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for record identity types.
///
/// A key addresses one row for update/delete and serves as grid row identity.
/// Several entities have composite natural keys, so the key is a struct
/// rather than a single numeric id.
pub trait RecordKey:
    Clone + PartialEq + Eq + Hash + Ord + Serialize + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static
{
    /// Stable string form (DOM ids, messages)
    fn as_string(&self) -> String;
}

impl RecordKey for i64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }
}

impl RecordKey for String {
    fn as_string(&self) -> String {
        self.clone()
    }
}
