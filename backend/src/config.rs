//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables. The YAML file is taken from `CAT_CARE_CONFIG` when
//! set, otherwise from `<data_dir>/config.yaml` if that file exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::advisor::gemini::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};

pub const ENV_CONFIG_PATH: &str = "CAT_CARE_CONFIG";
pub const ENV_DATA_DIR: &str = "CAT_CARE_DATA_DIR";
pub const ENV_BIND_ADDR: &str = "CAT_CARE_BIND_ADDR";
pub const ENV_CORS_ORIGIN: &str = "CAT_CARE_CORS_ORIGIN";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_GEMINI_ENDPOINT: &str = "GEMINI_ENDPOINT";

const CONFIG_FILE_NAME: &str = "config.yaml";
const DATA_DIRECTORY_NAME: &str = "Cat Care";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the care log store
    pub data_dir: PathBuf,
    pub bind_addr: String,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// The assistant is disabled when no key is set
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_addr: "127.0.0.1:3000".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
        }
    }
}

/// `~/Documents/Cat Care`, falling back to the home directory
pub fn default_data_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIRECTORY_NAME)
}

impl AppConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `env` to look up variables
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let data_dir = lookup(ENV_DATA_DIR)
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir);
                let candidate = data_dir.join(CONFIG_FILE_NAME);
                if candidate.exists() {
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(data_dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(bind_addr) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = bind_addr;
        }
        if let Some(origin) = lookup(ENV_CORS_ORIGIN) {
            config.cors_origin = origin;
        }
        if let Some(api_key) = lookup(ENV_GEMINI_API_KEY) {
            config.gemini.api_key = Some(api_key);
        }
        if let Some(model) = lookup(ENV_GEMINI_MODEL) {
            config.gemini.model = model;
        }
        if let Some(endpoint) = lookup(ENV_GEMINI_ENDPOINT) {
            config.gemini.endpoint = endpoint;
        }

        config.gemini.api_key = config.gemini.api_key.filter(|k| !k.trim().is_empty());

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Parse YAML. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_addr))
    }

    pub fn assistant_enabled(&self) -> bool {
        self.gemini.api_key.is_some()
    }
}
