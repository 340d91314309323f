//! Rule contracts
//!
//! A rule is registered as a factory that, given a logger and optional
//! options, produces a [`RuleInstance`]. Instances come in two shapes: a
//! set check runs once against the whole resolved file list, a file check
//! runs once per file. The shape is an explicit variant tag, not something
//! the engine probes for at runtime.

use crate::diagnostic::Diagnostic;
use crate::file::FileContext;
use crate::logger::Logger;
use async_trait::async_trait;
use std::sync::Arc;

/// Free-form options attached to a rule reference in a configuration.
pub type RuleOptions = serde_json::Value;

/// A check invoked once per rule-set with the entire resolved file list.
#[async_trait]
pub trait SetCheck: Send + Sync {
    /// Run against all resolved files. An `Err` is treated as an internal
    /// failure of the check, not as a finding.
    async fn check(
        &self,
        files: &[FileContext],
        options: Option<&RuleOptions>,
    ) -> anyhow::Result<Vec<Diagnostic>>;
}

/// A check invoked once per resolved file.
#[async_trait]
pub trait FileCheck: Send + Sync {
    /// Run against a single file. An `Err` is treated as an internal
    /// failure for that file only; other files are unaffected.
    async fn check(
        &self,
        file: &FileContext,
        options: Option<&RuleOptions>,
    ) -> anyhow::Result<Vec<Diagnostic>>;
}

/// A rule instance produced by a factory, tagged with its check shape.
///
/// The `File` variant is reference-counted because one instance is shared
/// across the concurrent per-file fan-out.
pub enum RuleInstance {
    /// Runs once against the full file set ("meta" check)
    Meta(Box<dyn SetCheck>),

    /// Runs once per file
    File(Arc<dyn FileCheck>),
}

impl RuleInstance {
    /// Human-readable name of the variant, for mismatch reporting
    pub fn shape(&self) -> &'static str {
        match self {
            RuleInstance::Meta(_) => "meta",
            RuleInstance::File(_) => "file",
        }
    }
}

/// Factory producing a fresh rule instance for each run.
///
/// Pure with respect to registration; side effects belong inside the
/// returned instance's check.
pub type RuleFactory = Arc<dyn Fn(Logger, Option<RuleOptions>) -> RuleInstance + Send + Sync>;

/// Wrap a closure as a [`RuleFactory`]
pub fn factory<F>(f: F) -> RuleFactory
where
    F: Fn(Logger, Option<RuleOptions>) -> RuleInstance + Send + Sync + 'static,
{
    Arc::new(f)
}
