//! CLI configuration, loadable from TOML and overridable from the environment.

use serde::Deserialize;

use mender_grammar::{Vocabulary, VocabularyError};

/// Env var pointing at a TOML config file.
pub const CONFIG_ENV: &str = "MENDER_CONFIG";

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Top-level configuration for the `mender` binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Custom vocabulary TOML. None uses the built-in dictionaries.
    #[serde(default)]
    pub vocabulary_path: Option<String>,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Recorded on every command issued.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Project the commands apply to. Defaults to the working directory.
    #[serde(default)]
    pub project_path: Option<String>,
    /// Free-form context forwarded with inference hand-offs.
    #[serde(default)]
    pub inference_context: Option<String>,
}

impl CliConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `MENDER_CONFIG` (if set), then apply env overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        let base = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `MENDER_*` overrides using `lookup` to read variables.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("MENDER_VOCABULARY") {
            self.vocabulary_path = Some(path);
        }
        let log_format = lookup("MENDER_LOG_FORMAT");
        if let Some(format) = log_format.as_deref().and_then(LogFormat::parse) {
            self.log_format = format;
        }
        if let Some(user) = lookup("MENDER_USER") {
            self.user_id = Some(user);
        }
        if let Some(project) = lookup("MENDER_PROJECT") {
            self.project_path = Some(project);
        }
        self
    }

    /// The configured vocabulary, or the defaults.
    pub fn load_vocabulary(&self) -> Result<Vocabulary, VocabularyError> {
        match &self.vocabulary_path {
            Some(path) => Vocabulary::from_file(path),
            None => Ok(Vocabulary::default()),
        }
    }
}
