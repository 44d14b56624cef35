//! The key-unique string-to-value mapping.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::Index;

use crate::value::{Value, NULL};

/// A JSON object.
///
/// Keys are unique and iteration is sorted by key (byte-wise), so dumps of
/// equal objects are byte-identical.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: BTreeMap<String, Value>,
}

impl Object {
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a member, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Returns the member for `key`, first inserting `Null` if it is absent.
    pub fn get_or_insert(&mut self, key: impl Into<String>) -> &mut Value {
        self.entries.entry(key.into()).or_default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, String, Value> {
        self.entries.values()
    }
}

impl From<BTreeMap<String, Value>> for Object {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl From<Object> for BTreeMap<String, Value> {
    fn from(object: Object) -> Self {
        object.entries
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Value)> for Object {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a mut Object {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = btree_map::IterMut<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter_mut()
    }
}

/// Read-only lookup; absent keys yield `Null` and are not inserted.
impl Index<&str> for Object {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.entries.get(key).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut obj = Object::new();
        assert_eq!(obj.insert("a", 1), None);
        assert_eq!(obj.insert("a", 2), Some(Value::Int(1)));
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["a"], Value::Int(2));
    }

    #[test]
    fn get_or_insert_materializes_null() {
        let mut obj = Object::new();
        assert!(obj.get_or_insert("missing").is_null());
        assert!(obj.contains_key("missing"));
        *obj.get_or_insert("missing") = Value::from("set");
        assert_eq!(obj.get("missing"), Some(&Value::from("set")));
    }

    #[test]
    fn index_does_not_insert() {
        let obj = Object::new();
        assert!(obj["nope"].is_null());
        assert!(obj.is_empty());
    }

    #[test]
    fn iteration_is_sorted_by_key() {
        let obj: Object = [("b", 2), ("a", 1), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), Value::from(v)))
            .collect();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn remove_and_extend() {
        let mut obj = Object::new();
        obj.extend([("x".to_owned(), Value::Bool(true))]);
        assert_eq!(obj.remove("x"), Some(Value::Bool(true)));
        assert_eq!(obj.remove("x"), None);
    }
}
