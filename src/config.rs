use crate::core::notification::DEFAULT_NOTIFICATION_TITLE;
use crate::core::validation::DEFAULT_SELECTION_MESSAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Whether the checked ids follow the user from step to step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SelectionScope {
    /// One selection shared by every step; it is not reset on advance.
    #[default]
    Carried,
    /// Each step keeps its own selection.
    PerStep,
}

/// Which comparison decides that the button reads as the final submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SubmitLabelRule {
    /// `index + 1 == total`.
    #[default]
    LastStep,
    /// `index - 1 == total`; never true while a step is active.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Labels {
    /// Template with `{current}` and `{total}` placeholders.
    pub progress: String,
    pub next: String,
    pub submit: String,
    pub validation: String,
    pub notification_title: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            progress: "Passo {current} de {total}".to_string(),
            next: "Próximo Passo".to_string(),
            submit: "Enviar".to_string(),
            validation: DEFAULT_SELECTION_MESSAGE.to_string(),
            notification_title: DEFAULT_NOTIFICATION_TITLE.to_string(),
        }
    }
}

impl Labels {
    pub fn progress(&self, current: usize, total: usize) -> String {
        self.progress
            .replace("{current}", &current.to_string())
            .replace("{total}", &total.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurveyConfig {
    pub selection_scope: SelectionScope,
    pub label_rule: SubmitLabelRule,
    pub initial_selection: Vec<String>,
    pub toast_timeout_ms: u64,
    pub labels: Labels,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            selection_scope: SelectionScope::default(),
            label_rule: SubmitLabelRule::default(),
            initial_selection: vec!["1".to_string()],
            toast_timeout_ms: 4_000,
            labels: Labels::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl SurveyConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn toast_timeout(&self) -> Duration {
        Duration::from_millis(self.toast_timeout_ms)
    }
}
