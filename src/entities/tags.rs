//! Persisted string tags attached to containers.
//!
//! Tags are stored as a sparse string map so they survive a save/load cycle
//! unchanged, but nothing outside this module reads the raw map. Each feature
//! goes through its own typed accessor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace prefix shared by every tag this crate writes.
pub const TAG_NAMESPACE: &str = "quickstack";

const AUTO_ORGANIZE_SUFFIX: &str = "AutoOrganize";
const ANIMATION_FINISH_SUFFIX: &str = "QuickStackAnimationMs";
const ENABLED_VALUE: &str = "1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    entries: BTreeMap<String, String>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

fn namespaced(suffix: &str) -> String {
    format!("{TAG_NAMESPACE}/{suffix}")
}

/// The "auto-organize" flag. Presence of a non-empty value is the whole state.
pub mod auto_organize {
    use super::*;

    pub fn key() -> String {
        namespaced(AUTO_ORGANIZE_SUFFIX)
    }

    pub fn set(tags: &mut TagMap) {
        tags.insert(key(), ENABLED_VALUE.to_string());
    }

    /// Returns whether a flag was present.
    pub fn clear(tags: &mut TagMap) -> bool {
        tags.remove(&key())
    }

    pub fn is_set(tags: &TagMap) -> bool {
        tags.get(&key()).is_some()
    }
}

/// Total length, in milliseconds, of the quick-stack animation playing on a container.
pub mod animation {
    use super::*;

    pub fn key() -> String {
        namespaced(ANIMATION_FINISH_SUFFIX)
    }

    /// Stores `total_ms`, measured from the current batch start, replacing any earlier value.
    pub fn record(tags: &mut TagMap, total_ms: u32) {
        tags.insert(key(), total_ms.to_string());
    }

    pub fn finish_ms(tags: &TagMap) -> Option<u32> {
        tags.get(&key()).and_then(|value| value.parse().ok())
    }
}
