use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fs::atomic_write;
use crate::paths::Workspace;
use crate::policy::Policies;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_DEEPLX_URL: &str = "https://api.deeplx.org/translate";

/// Settings for the augmented (chat-completion) translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Route allow-listed target languages through this backend.
    pub enable: bool,
    /// API key stored directly in config.
    pub api_key: String,
    /// Environment variable name containing the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Full chat-completions URL.
    pub url: String,
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            enable: false,
            api_key: String::new(),
            api_key_env: None,
            url: DEFAULT_OPENAI_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> String {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return key;
        }
        self.api_key.clone()
    }
}

/// Settings for the default translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeeplxConfig {
    pub url: String,
}

impl Default for DeeplxConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DEEPLX_URL.to_string(),
        }
    }
}

fn default_ignored_prefixes() -> Vec<String> {
    [",", "!", "/"].into_iter().map(String::from).collect()
}

const fn default_notice_ttl_secs() -> u64 {
    3
}

/// The complete configuration document.
///
/// Corresponds to `<workspace>/config.json`. Keys this type does not know are
/// carried through `extra` so a rewrite never drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Chat-client credentials, consumed by the transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_hash: Option<String>,
    /// Translation policies keyed by conversation.
    #[serde(default)]
    pub target_config: Policies,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub deeplx: DeeplxConfig,
    /// Message prefixes owned by other automation tools or bots.
    #[serde(default = "default_ignored_prefixes")]
    pub ignored_prefixes: Vec<String>,
    /// How long command notices stay visible before deletion.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            api_id: None,
            api_hash: None,
            target_config: Policies::new(),
            openai: OpenAiConfig::default(),
            deeplx: DeeplxConfig::default(),
            ignored_prefixes: default_ignored_prefixes(),
            notice_ttl_secs: default_notice_ttl_secs(),
            extra: serde_json::Map::new(),
        }
    }
}

impl ConfigFile {
    pub const fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }
}

/// Manages loading and saving the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager for `<workspace>/config.json`.
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            config_path: workspace.config_path(),
        }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    /// Rewrites the whole document.
    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(config).context("Failed to serialize config")?;

        atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }
}
