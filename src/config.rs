use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::defs::{
    CLIENT_CONF_PATH, DEFAULT_HOST, DEFAULT_LINE_API_BASE, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USERS_FILE, SERVER_CONF_PATH,
};
use crate::error::ConfigError;
use crate::logging::{log_info, log_warning};

pub const ENV_CHANNEL_ACCESS_TOKEN: &str = "CHANNEL_ACCESS_TOKEN";
pub const ENV_CHANNEL_SECRET: &str = "CHANNEL_SECRET";
pub const ENV_LINE_API_BASE: &str = "LINE_API_BASE";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub users_file: String,
    pub line_api_base: String,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: u64,
    pub user_id: String,
}

/// Messaging API credentials, read once at startup and handed to the
/// provider client. Never read from the environment inside request handling.
#[derive(Clone, PartialEq, Eq)]
pub struct LineCredentials {
    pub channel_access_token: String,
    pub channel_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            users_file: DEFAULT_USERS_FILE.to_string(),
            line_api_base: DEFAULT_LINE_API_BASE.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT_SECS,
            user_id: String::new(),
        }
    }
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_map(&parse_config(&content)))
    }

    fn from_map(config_map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let host = config_map.get("host").cloned().unwrap_or(defaults.host);

        let port = config_map.get("port")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let timeout = config_map.get("timeout")
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(defaults.timeout);

        let user_id = config_map.get("user_id").cloned().unwrap_or(defaults.user_id);

        ClientConfig { host, port, timeout, user_id }
    }

    pub fn load_or_default() -> Self {
        match Self::from_file(CLIENT_CONF_PATH) {
            Ok(config) => {
                log_info(&format!("Loaded client configuration from {CLIENT_CONF_PATH}"));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load client config from {CLIENT_CONF_PATH}: {e}. Using defaults."));
                Self::default()
            }
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl ServerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_map(&parse_config(&content)))
    }

    fn from_map(config_map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let host = config_map.get("host").cloned().unwrap_or(defaults.host);

        let port = config_map.get("port")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let users_file = config_map.get("users_file").cloned().unwrap_or(defaults.users_file);

        let line_api_base = config_map.get("line_api_base")
            .cloned()
            .unwrap_or(defaults.line_api_base);

        ServerConfig { host, port, users_file, line_api_base }
    }

    pub fn load_or_default() -> Self {
        match Self::from_file(SERVER_CONF_PATH) {
            Ok(config) => {
                log_info(&format!("Loaded configuration from {SERVER_CONF_PATH}"));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load config from {SERVER_CONF_PATH}: {e}. Using defaults."));
                Self::default()
            }
        }
    }

    /// Apply `LINE_API_BASE` from the environment, if set
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Blank values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(ENV_LINE_API_BASE) {
            if !base.trim().is_empty() {
                self.line_api_base = base.trim().to_string();
            }
        }
    }

    /// Command-line values win over the conf file
    pub fn apply_cli_overrides(&mut self, host: Option<String>, port: Option<u16>, users_file: Option<String>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(users_file) = users_file {
            self.users_file = users_file;
        }
    }
}

impl LineCredentials {
    /// Read both credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from any key lookup. Missing or blank values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(ConfigError::MissingVar(key)),
            }
        };

        Ok(Self {
            channel_access_token: read(ENV_CHANNEL_ACCESS_TOKEN)?,
            channel_secret: read(ENV_CHANNEL_SECRET)?,
        })
    }
}

impl fmt::Debug for LineCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineCredentials")
            .field("channel_access_token", &"<redacted>")
            .field("channel_secret", &"<redacted>")
            .finish()
    }
}

fn parse_config(content: &str) -> HashMap<String, String> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            config.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    config
}
