use crate::app::builtin::{Echo, LineStats};
use crate::domain::ports::Application;
use crate::utils::error::{HarnessError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Applications addressable by the name used in `days.application`.
#[derive(Clone, Default)]
pub struct ApplicationRegistry {
    applications: BTreeMap<String, Arc<dyn Application>>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Echo));
        registry.register(Arc::new(LineStats));
        registry
    }

    /// Registers under `application.name()`, replacing any previous entry.
    pub fn register(&mut self, application: Arc<dyn Application>) {
        let name = application.name().to_string();
        if self.applications.insert(name.clone(), application).is_some() {
            tracing::debug!("Replaced registered application '{}'", name);
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Application>> {
        self.applications
            .get(name)
            .cloned()
            .ok_or_else(|| HarnessError::UnknownApplicationError {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.applications.keys().map(String::as_str)
    }
}
