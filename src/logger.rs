//! Logger handed to rule factories
//!
//! Rules never talk to the `log` facade directly; the engine hands every
//! factory a [`Logger`] scoped to the rule's registered name so output can
//! be attributed without the rule knowing where it runs.

use std::fmt::Display;
use std::sync::Arc;

/// A cheap, cloneable logging handle.
///
/// Delegates to the `log` facade. An optional scope (usually the rule name)
/// is prepended to every message.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    scope: Option<Arc<str>>,
}

impl Logger {
    /// Create an unscoped logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a logger scoped under `name`
    pub fn scoped(&self, name: &str) -> Self {
        let scope = match &self.scope {
            Some(parent) => format!("{}:{}", parent, name),
            None => name.to_string(),
        };
        Self {
            scope: Some(scope.into()),
        }
    }

    /// The current scope, if any
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn debug(&self, message: impl Display) {
        match &self.scope {
            Some(scope) => log::debug!("[{}] {}", scope, message),
            None => log::debug!("{}", message),
        }
    }

    pub fn info(&self, message: impl Display) {
        match &self.scope {
            Some(scope) => log::info!("[{}] {}", scope, message),
            None => log::info!("{}", message),
        }
    }

    pub fn warn(&self, message: impl Display) {
        match &self.scope {
            Some(scope) => log::warn!("[{}] {}", scope, message),
            None => log::warn!("{}", message),
        }
    }

    pub fn error(&self, message: impl Display) {
        match &self.scope {
            Some(scope) => log::error!("[{}] {}", scope, message),
            None => log::error!("{}", message),
        }
    }
}
