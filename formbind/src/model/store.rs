//! Shared value store

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::trace;

use super::Value;

/// The single source of truth for every field value of a form.
///
/// Holds at most one [`Value`] per field name. A missing entry means "no
/// value", which validators treat differently from an explicit empty value.
///
/// `ValueStore` is a cheap handle: clones share the same entries, so the
/// application can keep one to read submitted values while the form owns
/// another.
///
/// # Example
///
/// ```
/// use formbind::model::{Value, ValueStore};
///
/// let store = ValueStore::new();
/// let handle = store.clone();
///
/// store.set("name", "Asha");
/// assert_eq!(handle.get("name"), Some(Value::from("Asha")));
/// assert!(!handle.contains("phone"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    fields: Arc<RwLock<HashMap<String, Value>>>,
}

impl ValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Read methods
    // =========================================================================

    /// Returns a copy of the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields
            .read()
            .ok()
            .and_then(|guard| guard.get(name).cloned())
    }

    /// Returns the text stored under `name`, if it is a text value.
    pub fn get_text(&self, name: &str) -> Option<String> {
        self.fields
            .read()
            .ok()
            .and_then(|guard| guard.get(name).and_then(Value::as_text).map(str::to_string))
    }

    /// Returns `true` if the store has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fields
            .read()
            .map(|guard| guard.contains_key(name))
            .unwrap_or(false)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.fields.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of every entry.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.fields
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    // =========================================================================
    // Write methods
    // =========================================================================

    /// Stores `value` under `name`, replacing any previous entry.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        trace!("store: {} <- {:?}", name, value);
        if let Ok(mut guard) = self.fields.write() {
            guard.insert(name, value);
        }
    }

    /// Removes the entry for `name` and returns its value.
    pub fn remove(&self, name: &str) -> Option<Value> {
        trace!("store: remove {}", name);
        self.fields
            .write()
            .ok()
            .and_then(|mut guard| guard.remove(name))
    }

    /// Removes every entry.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.fields.write() {
            guard.clear();
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            fields: Arc::new(RwLock::new(fields)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_name() {
        let store = ValueStore::new();
        store.set("city", "Pune");
        store.set("city", "Delhi");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_text("city").as_deref(), Some("Delhi"));
    }

    #[test]
    fn test_absent_differs_from_empty() {
        let store = ValueStore::new();
        assert_eq!(store.get("note"), None);
        store.set("note", "");
        assert_eq!(store.get("note"), Some(Value::from("")));
        assert_eq!(store.remove("note"), Some(Value::from("")));
        assert!(!store.contains("note"));
    }

    #[test]
    fn test_from_iter() {
        let store: ValueStore = [("a", Value::from(1i64)), ("b", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_text("a"), None);
        assert_eq!(store.get_text("b").as_deref(), Some("x"));
    }
}
