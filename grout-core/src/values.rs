use crate::{AsValue, Value};
use std::collections::HashMap;

/// Key-value source with case-insensitive lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values {
    entries: HashMap<String, Value>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl AsValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl AsValue) {
        self.entries.insert(name.into(), value.as_value());
    }

    /// Exact-case lookup first, then a case-insensitive scan.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).or_else(|| {
            self.entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: AsValue> FromIterator<(K, V)> for Values {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Values::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_lookup() {
        let values = Values::new().with("tableName", "users").with("n", 1i32);
        assert_eq!(values.get("TABLENAME"), Some(&Value::Varchar(Some("users".into()))));
        assert_eq!(values.get("N"), Some(&Value::Int32(Some(1))));
        assert_eq!(values.get("missing"), None);
    }
}
