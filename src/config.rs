use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub host: String,
    pub port: u16,
    /// Sessions untouched for this long are dropped.
    pub session_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: "gemini-2.5-pro".to_string(),
            gemini_api_base: "https://generativelanguage.googleapis.com".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8501,
            session_ttl_secs: 3600,
        }
    }
}

/// What the page is allowed to see. The key itself never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicConfig {
    pub model: String,
    pub has_api_key: bool,
}

impl AppConfig {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("note-refiner")
    }

    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");
        let mut config = if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("Ignoring invalid config {}: {}", config_path.display(), e);
                    Self::default()
                }),
                Err(e) => {
                    log::warn!("Cannot read config {}: {}", config_path.display(), e);
                    Self::default()
                }
            }
        } else {
            let c = Self::default();
            c.save(config_dir);
            c
        };

        config.apply_env();
        config
    }

    pub fn save(&self, config_dir: &Path) {
        if let Err(e) = std::fs::create_dir_all(config_dir) {
            log::warn!("Cannot create config dir {}: {}", config_dir.display(), e);
            return;
        }
        let config_path = config_dir.join("config.json");
        if let Ok(content) = serde_json::to_string_pretty(self) {
            std::fs::write(config_path, content).ok();
        }
    }

    /// Environment wins over the file; the secret store for the key is the env.
    pub fn apply_env(&mut self) {
        if let Some(key) = non_empty_env(API_KEY_ENV) {
            self.gemini_api_key = key;
        }
        if let Some(model) = non_empty_env("GEMINI_MODEL") {
            self.gemini_model = model;
        }
        if let Some(base) = non_empty_env("GEMINI_API_BASE") {
            self.gemini_api_base = base;
        }
        if let Some(host) = non_empty_env("NOTE_REFINER_HOST") {
            self.host = host;
        }
        if let Some(port) = non_empty_env("NOTE_REFINER_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => log::warn!("NOTE_REFINER_PORT={} is not a port, keeping {}", port, self.port),
            }
        }
        if let Some(ttl) = non_empty_env("NOTE_REFINER_SESSION_TTL_SECS") {
            match ttl.parse() {
                Ok(ttl) if ttl > 0 => self.session_ttl_secs = ttl,
                _ => log::warn!(
                    "NOTE_REFINER_SESSION_TTL_SECS={} is not a positive number, keeping {}",
                    ttl,
                    self.session_ttl_secs
                ),
            }
        }
    }

    pub fn session_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session_ttl_secs.max(1))
    }

    /// Picks the credential for one submit: the configured secret first, then
    /// whatever the user typed into the page.
    pub fn resolve_api_key(&self, supplied: Option<&str>) -> Option<String> {
        if !self.gemini_api_key.trim().is_empty() {
            return Some(self.gemini_api_key.trim().to_string());
        }
        supplied
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    pub fn public(&self) -> PublicConfig {
        PublicConfig {
            model: self.gemini_model.clone(),
            has_api_key: !self.gemini_api_key.trim().is_empty(),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
