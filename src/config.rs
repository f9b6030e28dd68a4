use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Environment variable overriding `notifier.bot_token`
pub const ENV_BOT_TOKEN: &str = "STOREFRONT_BOT_TOKEN";
/// Environment variable overriding `notifier.chat_id`
pub const ENV_CHAT_ID: &str = "STOREFRONT_CHAT_ID";
/// Config profile used when `--env` is not given
pub const ENV_PROFILE: &str = "STOREFRONT_ENV";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default)]
    pub use_json: bool,
    #[serde(default)]
    pub rotation: LogRotation,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// How often the log file rolls over.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Hourly,
    #[default]
    Daily,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_log_file() -> String {
    "storefront.log".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Chat notifier settings.
///
/// Empty `bot_token` or `chat_id` means notifications are disabled.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotifierConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_queue_size() -> usize {
    256
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_api_base(),
            timeout_ms: default_timeout_ms(),
            queue_size: default_queue_size(),
        }
    }
}

impl NotifierConfig {
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml` and apply environment overrides.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
            path: config_path.clone(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace notifier credentials with values found through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_BOT_TOKEN) {
            self.notifier.bot_token = token;
        }
        if let Some(chat_id) = lookup(ENV_CHAT_ID) {
            self.notifier.chat_id = chat_id;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.notifier.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "notifier.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.notifier.queue_size == 0 {
            return Err(ConfigError::Invalid(
                "notifier.queue_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
log_level: info
log_dir: ./logs
log_file: storefront.log
use_json: false
rotation: daily
gateway:
  host: 0.0.0.0
  port: 5000
"#;

    #[test]
    fn test_parse_without_notifier_section_is_disabled() {
        let config = AppConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.notifier.timeout_ms, 5000);
        assert_eq!(config.notifier.api_base, "https://api.telegram.org");
        assert!(!config.notifier.is_enabled());
    }

    #[test]
    fn test_env_overrides_enable_notifier() {
        let mut config = AppConfig::from_yaml(SAMPLE).unwrap();
        config.apply_env_overrides(|key| match key {
            ENV_BOT_TOKEN => Some("123:abc".to_string()),
            ENV_CHAT_ID => Some("-100200".to_string()),
            _ => None,
        });
        assert_eq!(config.notifier.bot_token, "123:abc");
        assert_eq!(config.notifier.chat_id, "-100200");
        assert!(config.notifier.is_enabled());
    }

    #[test]
    fn test_token_without_chat_id_stays_disabled() {
        let mut config = AppConfig::from_yaml(SAMPLE).unwrap();
        config.notifier.bot_token = "123:abc".to_string();
        config.notifier.chat_id = "   ".to_string();
        assert!(!config.notifier.is_enabled());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let yaml = format!("{}notifier:\n  timeout_ms: 0\n", SAMPLE);
        let err = AppConfig::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_log_settings_default_when_omitted() {
        let config = AppConfig::from_yaml("gateway:\n  host: 127.0.0.1\n  port: 5000\n").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir, "./logs");
        assert_eq!(config.log_file, "storefront.log");
        assert!(!config.use_json);
        assert_eq!(config.rotation, LogRotation::Daily);
    }

    #[test]
    fn test_rotation_parsed_and_checked() {
        let yaml = SAMPLE.replace("rotation: daily", "rotation: hourly");
        assert_eq!(AppConfig::from_yaml(&yaml).unwrap().rotation, LogRotation::Hourly);

        let yaml = SAMPLE.replace("rotation: daily", "rotation: weekly");
        assert!(matches!(
            AppConfig::from_yaml(&yaml).unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = AppConfig::from_yaml("gateway: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
