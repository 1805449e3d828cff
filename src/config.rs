use std::path::PathBuf;

use eyre::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::llm::Provider;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Settings read from ~/.config/tubetitles/config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub provider: Option<Provider>,
    pub anthropic_model: Option<String>,
    pub groq_model: Option<String>,
    pub max_tokens: Option<u32>,
    pub api_base: Option<String>,
}

impl Config {
    /// Load config from ~/.config/tubetitles/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn model_for(&self, provider: Provider) -> String {
        let configured = match provider {
            Provider::Anthropic => self.anthropic_model.as_deref(),
            Provider::Groq => self.groq_model.as_deref(),
        };
        configured.unwrap_or(provider.default_model()).to_string()
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Base URL the terminal client talks to
    pub fn api_base(&self) -> String {
        self.api_base.clone().unwrap_or_else(|| {
            format!("http://localhost:{}", self.port.unwrap_or(DEFAULT_PORT))
        })
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("tubetitles")
        .join("config.toml")
}

/// Upstream API keys, read once at startup
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub youtube_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub groq_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            youtube_api_key: get("YOUTUBE_API_KEY"),
            anthropic_api_key: get(Provider::Anthropic.api_key_var()),
            groq_api_key: get(Provider::Groq.api_key_var()),
        }
    }

    pub fn for_provider(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
            Provider::Groq => self.groq_api_key.as_deref(),
        }
    }

    /// Log each credential the given provider setup will need but lacks
    pub fn warn_missing(&self, provider: Provider) {
        if self.youtube_api_key.is_none() {
            warn!("YOUTUBE_API_KEY is not set; video lookups will fail");
        }
        if self.for_provider(provider).is_none() {
            warn!("{} is not set; title generation will fail", provider.api_key_var());
        }
    }
}
