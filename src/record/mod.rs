//! Record abstraction layer.
//!
//! This module defines the [`Record`] trait and the [`MalformedPolicy`] that
//! governs what the gateway does with entries it cannot decode.  Concrete
//! record shapes live in sub-modules.
//!
//! ## Adding a new record shape
//!
//! 1. Create a new file in this directory (e.g. `course.rs`).
//! 2. Define the struct and implement [`Record`] for it.
//! 3. Add `mod course;` below and re-export the struct.
//! 4. Add a variant to `config::Variant` and a row renderer in `ui`.
//!
//! The gateway, repository, requirement, view-model and app are all generic
//! over `Record`, so nothing else has to change.

mod data_item;
mod historical_item;

pub use data_item::DataItem;
pub use historical_item::HistoricalItem;

#[cfg(test)]
pub(crate) use historical_item::tests::entry as historical_entry;

use serde_json::Value;

use crate::error::Result;

/// A record type that one cloud function returns as a list.
pub trait Record: Clone + Send + Sync + 'static {
    /// Name of the cloud function that lists records of this type.
    const FUNCTION: &'static str;

    /// Plural noun used in user-facing messages ("No {NOUN} found.").
    const NOUN: &'static str;

    /// Pull the list of raw entries out of the function's `result` payload.
    ///
    /// Must fail with [`GatewayError::UnexpectedShape`](crate::error::GatewayError)
    /// when the payload is not the structure this record type is served in.
    fn entries(payload: Value) -> Result<Vec<Value>>;

    /// Decode one raw entry.  The error string explains what was wrong.
    fn decode(entry: Value) -> std::result::Result<Self, String>;

    /// Case-insensitive search.  `needle` is already lowercased.
    fn matches(&self, needle: &str) -> bool;
}

/// What to do with an entry that fails [`Record::decode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Drop the entry, log a warning, keep the rest.
    #[default]
    Skip,
    /// Fail the whole call.
    Reject,
}

/// `needle` must already be lowercase.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ignore_case_matches_mixed_case() {
        assert!(contains_ignore_case("Battle of Hastings", "hastings"));
        assert!(contains_ignore_case("ÉPOCA Colonial", "época"));
        assert!(!contains_ignore_case("Battle", "war"));
    }

    #[test]
    fn default_policy_skips() {
        assert_eq!(MalformedPolicy::default(), MalformedPolicy::Skip);
    }
}
