//! Warden - Pluggable Static-Analysis Runner
//!
//! A registry of named rules bound to file-selection locators via named
//! configurations, executed against a workspace to produce diagnostics.
//!
//! # Architecture
//!
//! ```text
//! bootstrap -> AnalysisContext -> Engine -> RuleSet -> FileLocator -> checks
//! ```
//!
//! Callers populate an [`AnalysisContext`] during a one-time bootstrap
//! phase (rule factories plus configuration definitions), then hand it to
//! the [`Engine`], which resolves each rule-set's file locator, runs the
//! referenced checks concurrently, and aggregates diagnostics into one
//! ordered [`RunResult`].
//!
//! # Defining a rule
//!
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use warden::{
//!     factory, AnalysisContext, ConfigDefinition, Diagnostic, FileCheck, FileContext,
//!     GlobLocator, RuleInstance, RuleOptions, RuleRef, RuleSet,
//! };
//!
//! struct NoTodo;
//!
//! #[async_trait]
//! impl FileCheck for NoTodo {
//!     async fn check(
//!         &self,
//!         file: &FileContext,
//!         _options: Option<&RuleOptions>,
//!     ) -> anyhow::Result<Vec<Diagnostic>> {
//!         if file.content.contains("TODO") {
//!             Ok(vec![Diagnostic::failure("no-todo", "found TODO marker")
//!                 .with_file(&file.filename)])
//!         } else {
//!             Ok(Vec::new())
//!         }
//!     }
//! }
//!
//! let mut ctx = AnalysisContext::new();
//! ctx.bootstrap(|ctx| {
//!     ctx.register_rule(
//!         "no-todo",
//!         factory(|_logger, _options| RuleInstance::File(Arc::new(NoTodo))),
//!     )?;
//!     ctx.register_config(ConfigDefinition::new("recommended").with_rule_set(
//!         RuleSet::new(Arc::new(GlobLocator::new(["**/*.rs"])))
//!             .with_file_check(RuleRef::new("no-todo")),
//!     ))
//! })
//! .unwrap();
//! ```

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod engine;
pub mod file;
pub mod locator;
pub mod logger;
pub mod registry;
pub mod rule;
pub mod settings;

// Re-export main types
pub use config::{Checks, ConfigDefinition, RuleRef, RuleSet};
pub use context::AnalysisContext;
pub use diagnostic::{Diagnostic, STATUS_INTERNAL, STATUS_PASS};
pub use engine::{CancelToken, Engine, RunResult};
pub use file::{FileContext, FileHandle};
pub use locator::{FileLocator, GlobLocator, LocatorError, StaticLocator};
pub use logger::Logger;
pub use registry::{ConfigRegistry, ConfigurationError, RuleRegistry};
pub use rule::{factory, FileCheck, RuleFactory, RuleInstance, RuleOptions, SetCheck};
pub use settings::{EngineSettings, RuleToggles, Settings, SettingsError};
