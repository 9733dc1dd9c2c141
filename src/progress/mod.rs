pub mod profile;
pub mod store;

use std::collections::BTreeSet;

use crate::content::CardKey;

/// Snapshot of both status lists, read once per deck rebuild so the filter
/// sees a consistent view.
#[derive(Clone, Debug, Default)]
pub struct StatusSets {
    pub hidden: BTreeSet<CardKey>,
    pub unlearned: BTreeSet<CardKey>,
}

impl StatusSets {
    /// Study-mode visibility: an item is hidden from study when it sits in
    /// either list. The same rule drives the cleared-page indicator.
    pub fn excludes_from_study(&self, key: &CardKey) -> bool {
        self.hidden.contains(key) || self.unlearned.contains(key)
    }
}
