//! Analysis context and bootstrap
//!
//! The registries are not process globals: callers own an
//! [`AnalysisContext`] and hand it to the engine, so tests can build
//! isolated contexts instead of sharing process state. Registration is
//! confined to the bootstrap phase; after bootstrap completes the context
//! is only ever read, which is what makes lock-free concurrent runs sound.

use crate::config::ConfigDefinition;
use crate::registry::{ConfigRegistry, ConfigurationError, RuleRegistry};
use crate::rule::RuleFactory;

/// Owner of both registries, populated once during bootstrap.
#[derive(Default)]
pub struct AnalysisContext {
    rules: RuleRegistry,
    configs: ConfigRegistry,
    bootstrapped: bool,
}

impl AnalysisContext {
    /// Create an empty, un-bootstrapped context
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the registries exactly once.
    ///
    /// The first successful call runs `populate` and marks the context
    /// bootstrapped; every later call is a no-op. A failing `populate` is
    /// a fatal wiring error; the context is not marked bootstrapped.
    pub fn bootstrap<F>(&mut self, populate: F) -> Result<(), ConfigurationError>
    where
        F: FnOnce(&mut Self) -> Result<(), ConfigurationError>,
    {
        if self.bootstrapped {
            return Ok(());
        }
        populate(self)?;
        self.bootstrapped = true;
        Ok(())
    }

    /// Whether bootstrap has completed
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Register a rule factory under `name`
    pub fn register_rule(
        &mut self,
        name: &str,
        factory: RuleFactory,
    ) -> Result<(), ConfigurationError> {
        self.rules.register(name, factory)
    }

    /// Register a configuration
    pub fn register_config(
        &mut self,
        definition: ConfigDefinition,
    ) -> Result<(), ConfigurationError> {
        self.configs.register(definition)
    }

    /// The rule registry
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// The configuration registry
    pub fn configs(&self) -> &ConfigRegistry {
        &self.configs
    }
}
