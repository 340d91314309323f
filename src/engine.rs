//! Core execution engine
//!
//! Given a registered configuration and a workspace root, the engine
//! resolves each rule-set's file locator, instantiates the referenced
//! rules, runs every check, and aggregates diagnostics into one ordered
//! stream.
//!
//! Error containment follows three scopes. Unknown rule or configuration
//! names are fatal and abort before any check executes. A locator failure
//! skips its own rule-set and the rest of the run continues. A failing
//! check becomes a single internal-failure diagnostic for that reference
//! (and file, for file checks) without disturbing sibling checks.
//!
//! Rule-sets execute sequentially in declaration order; per-file checks
//! fan out concurrently over the resolved files and are joined before the
//! next reference starts. Diagnostic order is deterministic either way.

use crate::config::{ConfigDefinition, RuleRef};
use crate::context::AnalysisContext;
use crate::diagnostic::Diagnostic;
use crate::file::{FileContext, FileHandle};
use crate::locator::FileLocator;
use crate::logger::Logger;
use crate::registry::ConfigurationError;
use crate::rule::{FileCheck, RuleFactory, RuleInstance, RuleOptions};
use crate::settings::Settings;
use futures::future::join_all;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Rule name attached to diagnostics about unreadable files
const FILE_READ_RULE: &str = "file-read-error";

/// Rule name attached to diagnostics about skipped rule-sets
const LOCATOR_RULE: &str = "locator-error";

/// Run-level cancellation flag.
///
/// Cancelling lets in-flight checks finish but suppresses scheduling of
/// not-yet-started references and rule-sets.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Result of one engine run
#[derive(Debug, Default)]
pub struct RunResult {
    /// All diagnostics, in deterministic order: rule-sets in declaration
    /// order, references in declaration order, files in locator order
    pub diagnostics: Vec<Diagnostic>,

    /// Files resolved and hydrated across all rule-sets
    pub files_processed: usize,

    /// Check references executed (a file check counts once, not per file)
    pub checks_run: usize,

    /// Rule-sets skipped because their locator failed
    pub rule_sets_skipped: usize,

    /// Diagnostics with nonzero status
    pub failure_count: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunResult {
    /// Append one diagnostic, tracking the failure count
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_failure() {
            self.failure_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Append many diagnostics
    pub fn extend(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    /// Whether the run passed (no diagnostic has nonzero status)
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    /// Process exit code for callers (0 = pass, 1 = failing findings)
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Iterate over failing diagnostics only
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_failure())
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: RunResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.checks_run += other.checks_run;
        self.rule_sets_skipped += other.rule_sets_skipped;
        self.failure_count += other.failure_count;
    }
}

/// A rule reference resolved against the registry, ready to instantiate.
struct PlannedRef {
    name: String,
    factory: RuleFactory,
    options: Option<RuleOptions>,
}

/// A rule-set with every reference resolved.
struct PlannedSet {
    locator: Arc<dyn FileLocator>,
    meta: Vec<PlannedRef>,
    file: Vec<PlannedRef>,
}

/// The main execution engine.
///
/// Holds a read-only view of a bootstrapped [`AnalysisContext`]; many runs
/// may share one context concurrently.
pub struct Engine {
    context: Arc<AnalysisContext>,
    settings: Settings,
    logger: Logger,
}

impl Engine {
    /// Create an engine over a bootstrapped context with default settings
    pub fn new(context: Arc<AnalysisContext>) -> Self {
        Self {
            context,
            settings: Settings::default(),
            logger: Logger::new(),
        }
    }

    /// Replace the runner settings
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the root logger handed to rule factories
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Run a registered configuration against a workspace root.
    pub async fn run(
        &self,
        config_name: &str,
        workspace_root: &Path,
    ) -> Result<RunResult, ConfigurationError> {
        self.run_cancellable(config_name, workspace_root, &CancelToken::new())
            .await
    }

    /// Run a registered configuration, honoring a cancellation token.
    pub async fn run_cancellable(
        &self,
        config_name: &str,
        workspace_root: &Path,
        cancel: &CancelToken,
    ) -> Result<RunResult, ConfigurationError> {
        let start = Instant::now();
        let config = self.context.configs().get(config_name)?;

        // Resolve every reference up front: a configuration naming an
        // unknown rule aborts before any check executes.
        let plan = self.plan(&config)?;

        let mut result = RunResult::default();
        for (index, set) in plan.iter().enumerate() {
            if cancel.is_cancelled() {
                log::warn!("run cancelled before rule-set {}", index + 1);
                break;
            }
            self.run_rule_set(index, set, workspace_root, cancel, &mut result)
                .await;
        }

        result.duration = start.elapsed();
        log::debug!(
            "configuration '{}' produced {} diagnostics ({} failing)",
            config_name,
            result.diagnostics.len(),
            result.failure_count
        );
        Ok(result)
    }

    /// Resolve all rule references of a configuration against the registry
    fn plan(&self, config: &ConfigDefinition) -> Result<Vec<PlannedSet>, ConfigurationError> {
        config
            .rule_sets
            .iter()
            .map(|rule_set| {
                Ok(PlannedSet {
                    locator: Arc::clone(&rule_set.locator),
                    meta: self.plan_refs(&rule_set.checks.meta)?,
                    file: self.plan_refs(&rule_set.checks.file)?,
                })
            })
            .collect()
    }

    fn plan_refs(&self, refs: &[RuleRef]) -> Result<Vec<PlannedRef>, ConfigurationError> {
        refs.iter()
            .map(|rule_ref| {
                Ok(PlannedRef {
                    name: rule_ref.rule.clone(),
                    factory: self.context.rules().get(&rule_ref.rule)?,
                    options: rule_ref.options.clone(),
                })
            })
            .collect()
    }

    async fn run_rule_set(
        &self,
        index: usize,
        set: &PlannedSet,
        workspace_root: &Path,
        cancel: &CancelToken,
        result: &mut RunResult,
    ) {
        let handles = match set.locator.resolve(workspace_root).await {
            Ok(handles) => handles,
            Err(e) => {
                log::warn!("rule-set {} skipped: {}", index + 1, e);
                result.push(Diagnostic::internal(
                    LOCATOR_RULE,
                    &format!("rule-set {} skipped: {}", index + 1, e),
                ));
                result.rule_sets_skipped += 1;
                return;
            }
        };

        let files = self.hydrate(handles, result).await;
        result.files_processed += files.len();

        // Meta checks run even when the file set is empty
        for planned in &set.meta {
            if cancel.is_cancelled() {
                return;
            }
            if !self.settings.is_rule_enabled(&planned.name) {
                log::debug!("rule '{}' disabled, skipping", planned.name);
                continue;
            }
            self.run_meta_check(planned, &files, result).await;
        }

        for planned in &set.file {
            if cancel.is_cancelled() {
                return;
            }
            if !self.settings.is_rule_enabled(&planned.name) {
                log::debug!("rule '{}' disabled, skipping", planned.name);
                continue;
            }
            self.run_file_check(planned, &files, result).await;
        }
    }

    /// Hydrate file handles concurrently; unreadable files become per-file
    /// diagnostics and are dropped from the set.
    async fn hydrate(&self, handles: Vec<FileHandle>, result: &mut RunResult) -> Vec<FileContext> {
        let outcomes = join_all(handles.into_iter().map(|handle| async move {
            let filename = handle.filename.clone();
            handle.hydrate().await.map_err(|e| (filename, e))
        }))
        .await;

        let mut files = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(file) => files.push(file),
                Err((filename, e)) => {
                    result.push(
                        Diagnostic::internal(FILE_READ_RULE, &format!("failed to read file: {}", e))
                            .with_file(filename),
                    );
                }
            }
        }
        files
    }

    /// Instantiate and run one meta reference against the whole file set
    async fn run_meta_check(
        &self,
        planned: &PlannedRef,
        files: &[FileContext],
        result: &mut RunResult,
    ) {
        let instance = (planned.factory.as_ref())(
            self.logger.scoped(&planned.name),
            planned.options.clone(),
        );
        let check = match instance {
            RuleInstance::Meta(check) => check,
            other => {
                result.push(Diagnostic::internal(
                    &planned.name,
                    &format!(
                        "registered as a {} check but referenced under checks.meta",
                        other.shape()
                    ),
                ));
                return;
            }
        };

        result.checks_run += 1;
        match check.check(files, planned.options.as_ref()).await {
            Ok(diagnostics) => result.extend(diagnostics),
            Err(e) => result.push(Diagnostic::internal(
                &planned.name,
                &format!("check failed: {:#}", e),
            )),
        }
    }

    /// Instantiate one file reference and fan it out over every file.
    ///
    /// The same instance is reused across files; all per-file invocations
    /// are joined before this returns, so the next reference only starts
    /// once this one is fully done.
    async fn run_file_check(
        &self,
        planned: &PlannedRef,
        files: &[FileContext],
        result: &mut RunResult,
    ) {
        let instance = (planned.factory.as_ref())(
            self.logger.scoped(&planned.name),
            planned.options.clone(),
        );
        let check: Arc<dyn FileCheck> = match instance {
            RuleInstance::File(check) => check,
            other => {
                result.push(Diagnostic::internal(
                    &planned.name,
                    &format!(
                        "registered as a {} check but referenced under checks.file",
                        other.shape()
                    ),
                ));
                return;
            }
        };

        result.checks_run += 1;
        let outcomes: Vec<anyhow::Result<Vec<Diagnostic>>> = if self.settings.engine.parallel {
            join_all(files.iter().map(|file| {
                let check = Arc::clone(&check);
                let options = planned.options.clone();
                async move { check.check(file, options.as_ref()).await }
            }))
            .await
        } else {
            let mut outcomes = Vec::with_capacity(files.len());
            for file in files {
                outcomes.push(check.check(file, planned.options.as_ref()).await);
            }
            outcomes
        };

        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(diagnostics) => result.extend(diagnostics),
                Err(e) => result.push(
                    Diagnostic::internal(&planned.name, &format!("check failed: {:#}", e))
                        .with_file(&file.filename),
                ),
            }
        }
    }
}
