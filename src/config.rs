//! Configuration definitions
//!
//! A configuration is a named bundle of rule-sets; each rule-set pairs a
//! file locator with the rule references to run against its results.

use crate::locator::FileLocator;
use crate::rule::RuleOptions;
use std::sync::Arc;

/// Declares intent to run a named rule, with optional options.
#[derive(Debug, Clone)]
pub struct RuleRef {
    /// Registered rule name
    pub rule: String,

    /// Options passed to the factory and to every check invocation
    pub options: Option<RuleOptions>,
}

impl RuleRef {
    /// Reference a rule by name, no options
    pub fn new(rule: &str) -> Self {
        Self {
            rule: rule.to_string(),
            options: None,
        }
    }

    /// Attach options
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// The checks declared by a rule-set, split by check shape.
#[derive(Clone, Default)]
pub struct Checks {
    /// Checks run once against the entire resolved file set
    pub meta: Vec<RuleRef>,

    /// Checks run once per resolved file
    pub file: Vec<RuleRef>,
}

/// Pairing of a file locator with the rules to run against its results.
#[derive(Clone)]
pub struct RuleSet {
    /// Produces the candidate file set for this rule-set
    pub locator: Arc<dyn FileLocator>,

    /// Rules to run
    pub checks: Checks,
}

impl RuleSet {
    /// Create an empty rule-set over the given locator
    pub fn new(locator: Arc<dyn FileLocator>) -> Self {
        Self {
            locator,
            checks: Checks::default(),
        }
    }

    /// Add a meta check reference
    pub fn with_meta_check(mut self, rule_ref: RuleRef) -> Self {
        self.checks.meta.push(rule_ref);
        self
    }

    /// Add a file check reference
    pub fn with_file_check(mut self, rule_ref: RuleRef) -> Self {
        self.checks.file.push(rule_ref);
        self
    }
}

/// A named bundle of rule-sets. Immutable once registered.
#[derive(Clone)]
pub struct ConfigDefinition {
    /// Unique configuration name
    pub name: String,

    /// Rule-sets, executed in declaration order
    pub rule_sets: Vec<RuleSet>,
}

impl ConfigDefinition {
    /// Create an empty configuration
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rule_sets: Vec::new(),
        }
    }

    /// Add a rule-set
    pub fn with_rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_sets.push(rule_set);
        self
    }
}
