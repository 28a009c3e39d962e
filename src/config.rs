//! Application configuration: defaults, optional TOML file, then `.env` /
//! environment overrides.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::chats::Temperature;
use crate::postprocessing::{MarkerMode, ResponseParser, ViewOptions};

pub const ENV_LOGIN_URL: &str = "PERSONA_CHAT_LOGIN_URL";
pub const ENV_MARKER_MODE: &str = "PERSONA_CHAT_MARKER_MODE";
pub const ENV_CACHE_SIZE: &str = "PERSONA_CHAT_CACHE_SIZE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid login URL `{url}`: {source}")]
    InvalidLoginUrl { url: String, source: url::ParseError },
    #[error("Parser cache size must be greater than zero")]
    ZeroCacheSize,
    #[error("Default model `{0}` is not in the model list")]
    UnknownDefaultModel(String),
    #[error("Default temperature {0} is outside {min}..={max}", min = Temperature::MIN, max = Temperature::MAX)]
    DefaultTemperatureOutOfRange(f32),
    #[error("Invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthSettings,
    pub parser: ParserSettings,
    pub chats: ChatSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AuthSettings {
    /// Identity provider page signed-out users are redirected to.
    pub login_url: String,
    /// Query parameter carrying the path to come back to after login.
    pub return_param: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParserSettings {
    pub marker_mode: MarkerMode,
    pub cache_size: usize,
    pub collapse_reasoning: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChatSettings {
    pub models: Vec<String>,
    pub default_model: String,
    pub default_temperature: f32,
    pub max_title_len: usize,
    pub max_description_len: usize,
    pub max_context_len: usize,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            login_url: "http://localhost:8000/login".to_string(),
            return_param: "redirect_uri".to_string(),
        }
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            marker_mode: MarkerMode::Strict,
            cache_size: 256,
            collapse_reasoning: true,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            models: vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()],
            default_model: "gpt-3.5-turbo".to_string(),
            default_temperature: 0.7,
            max_title_len: 100,
            max_description_len: 500,
            max_context_len: 4000,
        }
    }
}

impl AuthSettings {
    /// Identity provider URL with `return_to` attached.
    pub fn login_redirect(&self, return_to: &str) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.login_url).map_err(|source| ConfigError::InvalidLoginUrl {
            url: self.login_url.clone(),
            source,
        })?;
        url.query_pairs_mut().append_pair(&self.return_param, return_to);
        Ok(url)
    }
}

impl ParserSettings {
    pub fn parser(&self) -> ResponseParser {
        ResponseParser::new(self.marker_mode)
    }

    pub fn cache_capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.cache_size).ok_or(ConfigError::ZeroCacheSize)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            collapse_reasoning: self.collapse_reasoning,
        }
    }
}

impl AppConfig {
    /// Defaults, then `path` if given, then `.env` and the process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            marker_mode = ?config.parser.marker_mode,
            cache_size = config.parser.cache_size,
            models = config.chats.models.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        debug!(path = %path.display(), "Config file read");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Override fields from environment-style lookups.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_LOGIN_URL) {
            self.auth.login_url = url;
        }
        if let Some(mode) = lookup(ENV_MARKER_MODE) {
            self.parser.marker_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "strict" => MarkerMode::Strict,
                "lenient" => MarkerMode::Lenient,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_MARKER_MODE,
                        value: mode,
                    })
                }
            };
        }
        if let Some(size) = lookup(ENV_CACHE_SIZE) {
            self.parser.cache_size = size.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_CACHE_SIZE,
                value: size.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.login_redirect("/")?;
        self.parser.cache_capacity()?;
        if !self.chats.models.contains(&self.chats.default_model) {
            return Err(ConfigError::UnknownDefaultModel(self.chats.default_model.clone()));
        }
        if Temperature::new(self.chats.default_temperature).is_none() {
            return Err(ConfigError::DefaultTemperatureOutOfRange(self.chats.default_temperature));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [parser]
            marker_mode = "lenient"

            [chats]
            models = ["gpt-4"]
            default_model = "gpt-4"
            "#,
        )
        .unwrap();
        assert_eq!(config.parser.marker_mode, MarkerMode::Lenient);
        assert_eq!(config.parser.cache_size, 256);
        assert_eq!(config.chats.default_model, "gpt-4");
        assert_eq!(config.chats.max_title_len, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[auth]\nlogin_url = \"https://id.example.com/login\"\n\n[parser]\ncache_size = 16"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.auth.login_url, "https://id.example.com/login");
        assert_eq!(config.parser.cache_size, 16);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_MARKER_MODE, "Lenient"),
            (ENV_CACHE_SIZE, "32"),
            (ENV_LOGIN_URL, "https://sso.example.org/auth"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.parser.marker_mode, MarkerMode::Lenient);
        assert_eq!(config.parser.cache_size, 32);
        assert_eq!(config.auth.login_url, "https://sso.example.org/auth");
    }

    #[test]
    fn bad_env_values_are_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_CACHE_SIZE).then(|| "many".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_CACHE_SIZE, .. }));
    }

    #[test]
    fn validate_catches_inconsistencies() {
        let mut config = AppConfig::default();
        config.parser.cache_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCacheSize)));

        let mut config = AppConfig::default();
        config.chats.default_model = "llama".into();
        assert!(matches!(config.validate(), Err(ConfigError::UnknownDefaultModel(_))));

        let mut config = AppConfig::default();
        config.chats.default_temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultTemperatureOutOfRange(_))
        ));

        let mut config = AppConfig::default();
        config.auth.login_url = "not a url".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLoginUrl { .. })));
    }

    #[test]
    fn login_redirect_carries_return_path() {
        let auth = AuthSettings {
            login_url: "https://id.example.com/login".into(),
            return_param: "next".into(),
        };
        let url = auth.login_redirect("/chats/42").unwrap();
        assert_eq!(url.as_str(), "https://id.example.com/login?next=%2Fchats%2F42");
    }
}
