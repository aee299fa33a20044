//! Configuration file support for interviewbot.
//!
//! Loads `interviewbot.toml` from the working directory and
//! `~/.config/interviewbot/config.toml`, then resolves the effective settings.
//! Precedence: CLI flags > project config > global config > defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use interviewbot_llm::{CompletionConfig, ProviderType, API_KEY_ENV};

/// Project config file name
pub const CONFIG_FILE_NAME: &str = "interviewbot.toml";

/// Directory under the user config dir holding the global config
pub const GLOBAL_CONFIG_DIR: &str = "interviewbot";

/// Global config file name
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

/// Web sessions idle this long are discarded
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

/// Contents of a config file. Project and global files share this shape.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Completion provider ("openai" or "echo")
    pub provider: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Base URL of an OpenAI-compatible API
    pub api_base: Option<String>,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Seconds of inactivity before a web session is discarded
    pub session_idle_secs: Option<u64>,
}

impl FileConfig {
    /// Load `interviewbot.toml` from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses
    /// - `Ok(None)` if it does not exist
    /// - `Err(...)` if it exists but fails to parse
    pub fn load_project(working_dir: &Path) -> Result<Option<Self>> {
        Self::load_from(&working_dir.join(CONFIG_FILE_NAME))
    }

    /// Load the global config, if any
    pub fn load_global() -> Result<Option<Self>> {
        match global_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(config))
    }
}

/// Path of the global config file
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<ProviderType>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Effective settings after applying precedence
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderType,
    pub completion: CompletionConfig,
    pub host: String,
    pub port: u16,
    pub session_idle_timeout: Duration,
}

impl Settings {
    /// Load both config files from disk and resolve against `overrides`
    pub fn load(working_dir: &Path, overrides: &Overrides) -> Result<Self> {
        let global = FileConfig::load_global().context("Failed to load global configuration")?;
        let project = FileConfig::load_project(working_dir)
            .context("Failed to load project configuration")?;
        let api_key = std::env::var(API_KEY_ENV).ok();

        Self::resolve(overrides, project.as_ref(), global.as_ref(), api_key)
    }

    pub fn resolve(
        overrides: &Overrides,
        project: Option<&FileConfig>,
        global: Option<&FileConfig>,
        api_key: Option<String>,
    ) -> Result<Self> {
        let layers = [project, global];

        let provider = match overrides.provider {
            Some(provider) => provider,
            None => match first(&layers, |c| c.provider.clone()) {
                Some(name) => name
                    .parse::<ProviderType>()
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("Invalid provider in configuration")?,
                None => ProviderType::OpenAi,
            },
        };

        let mut completion = CompletionConfig::default();
        if let Some(model) = overrides
            .model
            .clone()
            .or_else(|| first(&layers, |c| c.model.clone()))
        {
            completion = completion.with_model(model);
        }
        if let Some(temperature) = overrides
            .temperature
            .or_else(|| first(&layers, |c| c.temperature))
        {
            if !(0.0..=2.0).contains(&temperature) {
                anyhow::bail!("Temperature must be between 0.0 and 2.0, got {}", temperature);
            }
            completion = completion.with_temperature(temperature);
        }
        if let Some(api_base) = first(&layers, |c| c.api_base.clone()) {
            completion = completion.with_api_base(api_base);
        }
        if let Some(key) = api_key {
            completion = completion.with_api_key(key);
        }

        let host = overrides
            .host
            .clone()
            .or_else(|| first(&layers, |c| c.server.host.clone()))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = overrides
            .port
            .or_else(|| first(&layers, |c| c.server.port))
            .unwrap_or(DEFAULT_PORT);
        let session_idle_secs = first(&layers, |c| c.server.session_idle_secs)
            .unwrap_or(DEFAULT_SESSION_IDLE_SECS);
        if session_idle_secs == 0 {
            anyhow::bail!("server.session_idle_secs must be greater than 0");
        }

        Ok(Self {
            provider,
            completion,
            host,
            port,
            session_idle_timeout: Duration::from_secs(session_idle_secs),
        })
    }
}

/// First value found walking the layers in priority order
fn first<T>(layers: &[Option<&FileConfig>], get: impl Fn(&FileConfig) -> Option<T>) -> Option<T> {
    layers.iter().flatten().find_map(|config| get(*config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(toml_str: &str) -> FileConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Settings::resolve(&Overrides::default(), None, None, None).unwrap();
        assert_eq!(settings.provider, ProviderType::OpenAi);
        assert_eq!(settings.completion.model, "gpt-4o-mini");
        assert_eq!(settings.completion.temperature, 0.5);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8501);
        assert!(settings.completion.api_key.is_none());
        assert_eq!(settings.session_idle_timeout, Duration::from_secs(3600));
    }

    #[test]
    fn test_session_idle_timeout_from_config() {
        let project = parse("[server]\nsession_idle_secs = 90\n");
        let settings = Settings::resolve(&Overrides::default(), Some(&project), None, None).unwrap();
        assert_eq!(settings.session_idle_timeout, Duration::from_secs(90));

        let zero = parse("[server]\nsession_idle_secs = 0\n");
        assert!(Settings::resolve(&Overrides::default(), Some(&zero), None, None).is_err());
    }

    #[test]
    fn test_precedence() {
        let global = parse(
            r#"
provider = "echo"
model = "global-model"
temperature = 0.1

[server]
port = 9000
host = "0.0.0.0"
"#,
        );
        let project = parse(
            r#"
model = "project-model"

[server]
port = 9100
"#,
        );
        let overrides = Overrides {
            port: Some(9200),
            ..Default::default()
        };

        let settings =
            Settings::resolve(&overrides, Some(&project), Some(&global), Some("sk".into()))
                .unwrap();

        assert_eq!(settings.provider, ProviderType::Echo);
        assert_eq!(settings.completion.model, "project-model");
        assert_eq!(settings.completion.temperature, 0.1);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 9200);
        assert_eq!(settings.completion.api_key.as_deref(), Some("sk"));
    }

    #[test]
    fn test_cli_provider_wins() {
        let project = parse(r#"provider = "echo""#);
        let overrides = Overrides {
            provider: Some(ProviderType::OpenAi),
            ..Default::default()
        };
        let settings = Settings::resolve(&overrides, Some(&project), None, None).unwrap();
        assert_eq!(settings.provider, ProviderType::OpenAi);
    }

    #[test]
    fn test_invalid_provider_is_error() {
        let project = parse(r#"provider = "gemini""#);
        assert!(Settings::resolve(&Overrides::default(), Some(&project), None, None).is_err());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let overrides = Overrides {
            temperature: Some(3.5),
            ..Default::default()
        };
        let err = Settings::resolve(&overrides, None, None, None).unwrap_err();
        assert!(err.to_string().contains("Temperature"));
    }

    #[test]
    fn test_load_project_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(FileConfig::load_project(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_project_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "model = \"gpt-4o\"\napi_base = \"http://localhost:8080/v1\"\n",
        )
        .unwrap();

        let config = FileConfig::load_project(dir.path()).unwrap().unwrap();
        assert_eq!(config.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_unknown_key_is_hard_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "api_key = \"sk-oops\"\n").unwrap();

        let err = FileConfig::load_project(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
