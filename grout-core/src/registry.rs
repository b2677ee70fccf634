use crate::{AsValue, Binding, Value};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

type ProviderFactory = Arc<dyn Fn() -> Box<dyn Iterator<Item = Value>> + Send + Sync>;

enum GlobalEntry {
    Value(Value),
    Provider(ProviderFactory),
}

/// Process-wide fallback store of names to static values or repeatable
/// value providers. Consulted as the last resolution tier in every
/// evaluation mode, independent of the per-call value source.
///
/// Created once at process start and injected where needed; reads are
/// frequent and take the shared lock, writes are rare. `clear` exists for
/// tests.
#[derive(Default)]
pub struct GlobalRegistry {
    entries: RwLock<HashMap<String, GlobalEntry>>,
}

impl GlobalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl AsValue) {
        self.write().insert(name.into(), GlobalEntry::Value(value.as_value()));
    }

    /// Register a provider factory. Every lookup produces a fresh
    /// per-evaluation iterator, so one registration can serve concurrent
    /// evaluations without sharing iteration state.
    pub fn set_provider<F, I>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        let factory: ProviderFactory = Arc::new(move || Box::new(factory().into_iter()));
        self.write().insert(name.into(), GlobalEntry::Provider(factory));
    }

    pub fn remove(&self, name: &str) {
        self.write().remove(name);
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Case-insensitive lookup: exact key first, then a scan.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        let entries = self.read();
        let entry = entries.get(name).or_else(|| {
            entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, entry)| entry)
        })?;
        Some(match entry {
            GlobalEntry::Value(value) => Binding::Value(value.clone()),
            GlobalEntry::Provider(factory) => Binding::Provider {
                values: factory(),
                declared: Value::Null,
            },
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, GlobalEntry>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, GlobalEntry>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_and_providers() {
        let globals = GlobalRegistry::new();
        globals.set("appName", "grout");
        globals.set_provider("seq", || (1..=3).map(|n| Value::Int32(Some(n))));

        assert!(matches!(globals.lookup("APPNAME"), Some(Binding::Value(..))));
        let Some(Binding::Provider { mut values, .. }) = globals.lookup("seq") else {
            panic!("expected a provider binding");
        };
        assert_eq!(values.next(), Some(Value::Int32(Some(1))));
        assert_eq!(values.next(), Some(Value::Int32(Some(2))));

        globals.clear();
        assert!(globals.lookup("appName").is_none());
    }
}
