use crate::{Result, Value, Values};
use std::fmt;

/// Per-call source a placeholder resolves against.
#[derive(Clone, Copy, Default)]
pub enum ValueSource<'a> {
    /// No per-call values; only the global registry applies and unresolved
    /// placeholders are left untouched.
    #[default]
    None,
    /// A typed object navigated by property path through [`Fetch`].
    Object(&'a dyn Fetch),
    /// A case-insensitive key-value mapping.
    Values(&'a Values),
}

impl ValueSource<'_> {
    /// Scalar lookup convenience for condition predicates. Providers and
    /// the global registry are not consulted.
    pub fn peek(&self, name: &str) -> Option<Value> {
        match self {
            ValueSource::None => None,
            ValueSource::Values(values) => values.get(name).cloned(),
            ValueSource::Object(object) => match object.fetch(name) {
                Ok(Some(Binding::Value(value))) => Some(value),
                _ => None,
            },
        }
    }
}

impl fmt::Debug for ValueSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::None => f.write_str("ValueSource::None"),
            ValueSource::Object(..) => f.write_str("ValueSource::Object(..)"),
            ValueSource::Values(values) => write!(f, "ValueSource::Values({values:?})"),
        }
    }
}

/// Capability interface for property-path navigation over caller objects.
///
/// Adapters are explicit: generated by `#[derive(Fetch)]` or written by
/// hand. `path` is the placeholder name, possibly dotted; implementations
/// split off the first step and delegate the remainder to nested fields.
/// Returning `Err` marks a resolution failure, which the engine logs and
/// downgrades to Missing; it never aborts an evaluation.
pub trait Fetch {
    fn fetch(&self, path: &str) -> Result<Option<Binding>>;
}

/// What an accessor path resolved to.
pub enum Binding {
    Value(Value),
    /// A repeatable accessor: a lazy, per-evaluation iterator. Each yielded
    /// value fills one remaining occurrence of the placeholder; exhaustion
    /// triggers the null policy with the declared type.
    Provider {
        values: Box<dyn Iterator<Item = Value>>,
        declared: Value,
    },
}

impl Binding {
    pub fn value(value: impl crate::AsValue) -> Self {
        Binding::Value(value.as_value())
    }

    pub fn provider<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Binding::provider_typed(values, Value::Null)
    }

    /// Provider with a declared element type, consulted by the null policy
    /// when the iterator runs out.
    pub fn provider_typed<I>(values: I, declared: Value) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Binding::Provider {
            values: Box::new(values.into_iter()),
            declared,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(value) => write!(f, "Binding::Value({value:?})"),
            Binding::Provider { declared, .. } => {
                write!(f, "Binding::Provider {{ declared: {declared:?}, .. }}")
            }
        }
    }
}

/// Split a dotted property path into its first step and the remainder.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.find('.') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => (path, ""),
    }
}

/// Case-tolerant name match: the leading letter may differ in case, the
/// rest must match exactly.
pub fn name_matches(step: &str, field: &str) -> bool {
    let mut a = step.chars();
    let mut b = field.chars();
    match (a.next(), b.next()) {
        (Some(x), Some(y)) => {
            (x == y || x.to_lowercase().eq(y.to_lowercase())) && a.as_str() == b.as_str()
        }
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_splitting() {
        assert_eq!(split_path("user.address.city"), ("user", "address.city"));
        assert_eq!(split_path("name"), ("name", ""));
    }

    #[test]
    fn leading_letter_tolerance() {
        assert!(name_matches("TableName", "tableName"));
        assert!(name_matches("tableName", "tableName"));
        assert!(!name_matches("TABLENAME", "tableName"));
        assert!(!name_matches("tableNames", "tableName"));
    }
}
