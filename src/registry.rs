//! Rule and configuration registries
//!
//! Both registries are append-only maps populated during bootstrap: names
//! register at most once per lifetime, lookups of unknown names are hard
//! errors. There is no deletion or mutation API. A broken registration is
//! broken wiring the operator must fix, so these errors are fatal rather
//! than converted to diagnostics.

use crate::config::ConfigDefinition;
use crate::rule::RuleFactory;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Fatal wiring error: duplicate registration or unknown name.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("already know about rule '{0}', cannot redefine")]
    DuplicateRule(String),

    #[error("don't know about rule '{0}'")]
    UnknownRule(String),

    #[error("already know about configuration '{0}', cannot redefine")]
    DuplicateConfig(String),

    #[error("don't know about configuration '{0}'")]
    UnknownConfig(String),
}

/// Mapping from rule name to factory.
#[derive(Default)]
pub struct RuleRegistry {
    registrations: HashMap<String, RuleFactory>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`. Re-registering a name fails even
    /// when the factory is identical.
    pub fn register(&mut self, name: &str, factory: RuleFactory) -> Result<(), ConfigurationError> {
        if self.registrations.contains_key(name) {
            return Err(ConfigurationError::DuplicateRule(name.to_string()));
        }
        self.registrations.insert(name.to_string(), factory);
        Ok(())
    }

    /// Look up the factory registered under `name`.
    pub fn get(&self, name: &str) -> Result<RuleFactory, ConfigurationError> {
        self.registrations
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownRule(name.to_string()))
    }

    /// Whether `name` has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.registrations.contains_key(name)
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registered rule names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.keys().map(String::as_str)
    }
}

/// Mapping from configuration name to definition.
#[derive(Default)]
pub struct ConfigRegistry {
    registrations: HashMap<String, Arc<ConfigDefinition>>,
}

impl ConfigRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a configuration under its own name.
    pub fn register(&mut self, definition: ConfigDefinition) -> Result<(), ConfigurationError> {
        if self.registrations.contains_key(&definition.name) {
            return Err(ConfigurationError::DuplicateConfig(definition.name));
        }
        self.registrations
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    /// Look up a configuration by name.
    pub fn get(&self, name: &str) -> Result<Arc<ConfigDefinition>, ConfigurationError> {
        self.registrations
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownConfig(name.to_string()))
    }

    /// Whether `name` has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.registrations.contains_key(name)
    }

    /// Number of registered configurations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
