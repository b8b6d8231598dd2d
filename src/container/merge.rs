//! Shallow merge used by [`StateManager::set`](crate::container::StateManager::set).

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// State that accepts a partial update.
///
/// Implementations overwrite the top-level fields named by the patch and
/// leave every other field alone. Nested values are replaced, not merged.
pub trait Merge {
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

/// Object patches merge key by key, like `{...state, ...patch}`.
///
/// A state that is not an object becomes an empty object before the patch
/// lands. A patch that is not an object contributes no fields.
impl Merge for Value {
    type Patch = Value;

    fn merge(&mut self, patch: Value) {
        let Value::Object(incoming) = patch else {
            return;
        };
        if !self.is_object() {
            *self = Value::Object(Map::new());
        }
        if let Value::Object(fields) = self {
            fields.extend(incoming);
        }
    }
}

impl<K: Eq + Hash, V> Merge for HashMap<K, V> {
    type Patch = HashMap<K, V>;

    fn merge(&mut self, patch: Self::Patch) {
        self.extend(patch);
    }
}

impl<K: Ord, V> Merge for BTreeMap<K, V> {
    type Patch = BTreeMap<K, V>;

    fn merge(&mut self, patch: Self::Patch) {
        self.extend(patch);
    }
}
