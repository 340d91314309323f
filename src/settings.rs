//! Runner settings
//!
//! Reads settings from `.warden.yaml` / `.warden.json` (project-level).
//! Settings tune how the engine runs; what to run is the configuration
//! definitions registered in the [`crate::context::AnalysisContext`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file error
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Engine tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Fan out per-file checks concurrently (true) or run them one file at
    /// a time (false). Diagnostics order is the same either way.
    pub parallel: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Per-rule toggles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleToggles {
    /// Rule names skipped at execution time. Unknown names referenced by a
    /// configuration still fail fast; disabling only mutes known rules.
    pub disabled: Vec<String>,
}

/// Runner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Engine settings
    pub engine: EngineSettings,

    /// Rule toggles
    pub rules: RuleToggles,
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a YAML or JSON file, detected by extension.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
            "json" => Ok(serde_json::from_str(&content)?),
            _ => Err(SettingsError::Invalid(format!(
                "unknown settings file format: {}",
                path.display()
            ))),
        }
    }

    /// Load settings from the first file found in default locations under
    /// `dir`, falling back to defaults when none exists.
    pub fn load_default(dir: &Path) -> Result<Self, SettingsError> {
        let names = [".warden.yaml", ".warden.yml", ".warden.json", "warden.yaml"];
        for name in &names {
            let path: PathBuf = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default())
    }

    /// Whether a rule should run
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        !self.rules.disabled.iter().any(|name| name == rule)
    }
}
