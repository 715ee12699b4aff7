//! Name-keyed registry of specification records.
//!
//! Registration silently replaces any record with the same name; the last
//! write wins. A process-wide instance is available through [`registry`].

use crate::error::ToolError;
use crate::export::SchemaDocument;
use crate::spec::ToolSpec;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Registry of specification records, listed in name order.
#[derive(Debug, Default)]
pub struct Registry {
    tools: RwLock<BTreeMap<String, Arc<ToolSpec>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<ToolSpec>>> {
        self.tools.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<ToolSpec>>> {
        self.tools.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `spec` under its name, returning the record it replaced.
    pub fn register(&self, spec: Arc<ToolSpec>) -> Option<Arc<ToolSpec>> {
        let name = spec.name().to_string();
        let previous = self.write().insert(name.clone(), spec);
        if previous.is_some() {
            tracing::debug!(tool = %name, "replaced registered tool");
        } else {
            tracing::debug!(tool = %name, "registered tool");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<Arc<ToolSpec>> {
        self.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn remove(&self, name: &str) -> Option<Arc<ToolSpec>> {
        self.write().remove(name)
    }

    /// Every record, ordered by name.
    pub fn list(&self) -> Vec<Arc<ToolSpec>> {
        self.read().values().cloned().collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Export document for the record named `name`.
    pub fn export(&self, name: &str) -> Result<SchemaDocument, ToolError> {
        self.get(name)
            .map(|spec| spec.export())
            .ok_or_else(|| ToolError::not_found(format!("Tool '{name}' not found.")))
    }

    /// New registry holding only the named records. Unknown names are ignored.
    pub fn subset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Registry {
        let tools = self.read();
        let picked = names
            .into_iter()
            .filter_map(|n| tools.get(n).map(|s| (n.to_string(), Arc::clone(s))))
            .collect();
        Registry {
            tools: RwLock::new(picked),
        }
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::ToolFunction;
    use crate::schema::Signature;
    use crate::spec::ToolDefinition;
    use serde_json::Value;

    fn spec(name: &str, description: &str) -> Arc<ToolSpec> {
        let function = ToolFunction::new(name.to_string(), Signature::new(), |_| Ok(Value::Null));
        Arc::new(ToolSpec::new(ToolDefinition::new(name, description, function)).unwrap())
    }

    #[test]
    fn last_registration_wins() {
        let registry = Registry::new();
        assert!(registry.register(spec("search", "first")).is_none());
        let replaced = registry.register(spec("search", "second")).unwrap();

        assert_eq!(replaced.description(), "first");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("search").unwrap().description(), "second");
    }

    #[test]
    fn lists_in_name_order() {
        let registry = Registry::new();
        registry.register(spec("multiply", "m"));
        registry.register(spec("add", "a"));
        registry.register(spec("search", "s"));

        assert_eq!(registry.names(), vec!["add", "multiply", "search"]);
        let listed: Vec<_> = registry.list().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(listed, registry.names());
    }

    #[test]
    fn export_reports_unknown_names() {
        let registry = Registry::new();
        registry.register(spec("add", "Add"));

        assert_eq!(registry.export("add").unwrap().name, "add");
        let err = registry.export("nope").unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
        assert_eq!(err.to_string(), "Tool 'nope' not found.");
    }

    #[test]
    fn subset_shares_records() {
        let registry = Registry::new();
        registry.register(spec("add", "a"));
        registry.register(spec("multiply", "m"));

        let sub = registry.subset(["add", "missing"]);
        assert_eq!(sub.names(), vec!["add"]);
        assert!(Arc::ptr_eq(
            &sub.get("add").unwrap(),
            &registry.get("add").unwrap()
        ));
    }

    #[test]
    fn remove_and_contains() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        registry.register(spec("add", "a"));
        assert!(registry.contains("add"));
        assert!(registry.remove("add").is_some());
        assert!(!registry.contains("add"));
    }
}
