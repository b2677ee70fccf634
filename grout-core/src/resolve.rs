use crate::{Binding, ConditionSet, ConditionValue, Fetch, GlobalRegistry, Value, ValueSource};
use log::warn;
use std::collections::HashMap;

/// Outcome of resolving one placeholder name.
///
/// `condition` marks condition-derived results, which bypass keyword
/// escaping downstream. `declared` carries the accessor's declared type
/// (as a typed null prototype) for the null policy.
pub(crate) enum Resolution {
    /// No value anywhere: no condition, no accessor/key, no global.
    Absent,
    /// An accessor or key exists but holds a null.
    Null { declared: Value, condition: bool },
    Scalar {
        value: Value,
        condition: bool,
    },
    Provider {
        values: Box<dyn Iterator<Item = Value>>,
        declared: Value,
        condition: bool,
    },
}

/// Resolution priority is strictly condition rule, then value source, then
/// global registry. The registry is a fallback layer in every mode; a
/// registered condition, however, governs its name completely.
pub(crate) fn resolve(
    name: &str,
    source: &ValueSource<'_>,
    conditions: &HashMap<String, ConditionSet>,
    globals: &GlobalRegistry,
) -> Resolution {
    if let Some(set) = lookup_condition(conditions, name) {
        return match set.evaluate(source) {
            Some(ConditionValue::Literal(text)) => Resolution::Scalar {
                value: Value::Varchar(Some(text.clone())),
                condition: true,
            },
            Some(ConditionValue::Placeholder(other)) => {
                match resolve_source(other, source, globals) {
                    Resolution::Scalar { value, .. } => Resolution::Scalar { value, condition: true },
                    Resolution::Provider { values, declared, .. } => Resolution::Provider {
                        values,
                        declared,
                        condition: true,
                    },
                    Resolution::Null { declared, .. } => Resolution::Null { declared, condition: true },
                    Resolution::Absent => Resolution::Null {
                        declared: Value::Null,
                        condition: true,
                    },
                }
            }
            Some(ConditionValue::Null) | None => Resolution::Null {
                declared: Value::Null,
                condition: true,
            },
        };
    }
    resolve_source(name, source, globals)
}

fn resolve_source(name: &str, source: &ValueSource<'_>, globals: &GlobalRegistry) -> Resolution {
    let binding = match source {
        ValueSource::Object(object) => fetch_logged(*object, name),
        ValueSource::Values(values) => values.get(name).cloned().map(Binding::Value),
        ValueSource::None => None,
    };
    match binding.or_else(|| globals.lookup(name)) {
        Some(Binding::Value(value)) if value.is_null() => Resolution::Null {
            declared: value,
            condition: false,
        },
        Some(Binding::Value(value)) => Resolution::Scalar {
            value,
            condition: false,
        },
        Some(Binding::Provider { values, declared }) => Resolution::Provider {
            values,
            declared,
            condition: false,
        },
        None => Resolution::Absent,
    }
}

/// A failing accessor is logged and downgraded to Missing; it never aborts
/// the evaluation.
fn fetch_logged(object: &dyn Fetch, path: &str) -> Option<Binding> {
    match object.fetch(path) {
        Ok(binding) => binding,
        Err(error) => {
            warn!("placeholder `{path}` lookup failed, treated as missing: {error:#}");
            None
        }
    }
}

fn lookup_condition<'c>(
    conditions: &'c HashMap<String, ConditionSet>,
    name: &str,
) -> Option<&'c ConditionSet> {
    conditions.get(name).or_else(|| {
        conditions
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, set)| set)
    })
}
