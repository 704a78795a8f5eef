//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Default base URL of the TeamBrains API
const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Default URL of the TeamBrains web application
const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Signup CLI configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the TeamBrains API
    pub api_url: Option<String>,

    /// URL of the web application, shown after a successful signup
    pub app_url: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/tbsignup/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(api_url) = std::env::var("TBS_API_URL") {
            if !api_url.is_empty() {
                config.api_url = Some(api_url);
            }
        }
        if let Ok(app_url) = std::env::var("TBS_APP_URL") {
            if !app_url.is_empty() {
                config.app_url = Some(app_url);
            }
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tbsignup")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.app_url.is_some() {
            self.app_url = other.app_url;
        }
    }

    /// Base URL of the API, without a trailing slash
    pub fn api_url(&self) -> String {
        let url = self.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        url.trim_end_matches('/').to_string()
    }

    /// URL of the web application root
    pub fn app_url(&self) -> String {
        self.app_url
            .clone()
            .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url(), "http://localhost:5001");
        assert_eq!(config.app_url(), "http://localhost:3000");
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut config = Config {
            api_url: Some("http://a".to_string()),
            app_url: None,
        };
        config.merge(Config {
            api_url: Some("http://b".to_string()),
            app_url: Some("http://app".to_string()),
        });
        assert_eq!(config.api_url(), "http://b");
        assert_eq!(config.app_url(), "http://app");
    }

    #[test]
    fn test_api_url_trailing_slash_stripped() {
        let config = Config {
            api_url: Some("http://api.example.com/".to_string()),
            app_url: None,
        };
        assert_eq!(config.api_url(), "http://api.example.com");
    }
}
