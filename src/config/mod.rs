//! Configuration management
//!
//! YAML-based configuration with support for:
//! - Environment variable overrides
//! - Multiple configuration file locations
//! - Default values for all optional settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub signup: SignupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// TLS/HTTPS configuration (if not set, server runs HTTP)
    #[serde(default)]
    pub tls: Option<TlsConfig>,
    /// Directory of static assets served for paths no route matches
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls: None,
            static_dir: None,
        }
    }
}

/// TLS/HTTPS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to TLS certificate file (PEM format)
    pub cert_file: PathBuf,
    /// Path to TLS private key file (PEM format)
    pub key_file: PathBuf,
    /// Minimum TLS version (1.2 or 1.3)
    #[serde(default = "default_min_tls_version")]
    pub min_version: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_min_tls_version() -> String {
    "1.3".to_string()
}

/// Hosted backend (identity + row store) connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL; the identity API lives under `/auth/v1`, the row store under `/rest/v1`
    pub url: String,
    /// Public API key sent with every request
    pub anon_key: String,
    /// Privileged key, only needed to delete accounts when rolling back a sign-up
    #[serde(default)]
    pub service_role_key: Option<String>,
    /// Timeout in seconds (supports both timeout_secs and timeout field names)
    #[serde(default = "default_timeout", alias = "timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_organisation_table")]
    pub organisation_table: String,
    #[serde(default = "default_member_table")]
    pub member_table: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: None,
            timeout_secs: default_timeout(),
            organisation_table: default_organisation_table(),
            member_table: default_member_table(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_organisation_table() -> String {
    "organisation".to_string()
}

fn default_member_table() -> String {
    "member".to_string()
}

/// Sign-up workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupConfig {
    /// Undo already-committed steps when a later sign-up step fails
    #[serde(default = "default_rollback_on_failure")]
    pub rollback_on_failure: bool,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            rollback_on_failure: default_rollback_on_failure(),
        }
    }
}

fn default_rollback_on_failure() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Log output target (console or file)
    #[serde(default)]
    pub target: LogTarget,
    /// Directory for log files (used when target is "file" or "both")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name prefix
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,
    /// Enable daily log rotation
    #[serde(default = "default_log_rotation")]
    pub daily_rotation: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            log_dir: default_log_dir(),
            log_prefix: default_log_prefix(),
            daily_rotation: default_log_rotation(),
        }
    }
}

/// Log output target
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to console (stdout/stderr) - default for development
    #[default]
    Console,
    /// Log to file with optional rotation - recommended for production
    File,
    /// Log to both console and file
    Both,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("/var/log/org-portal")
}

fn default_log_prefix() -> String {
    "org-portal".to_string()
}

fn default_log_rotation() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            signup: SignupConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file (YAML)
    /// 3. Environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("ORG_PORTAL_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file);

        let mut config = match config_path {
            Some(ref path) if path.exists() => {
                eprintln!("[CONFIG] Loading configuration from: {:?}", path);
                Self::from_file(path)?
            }
            Some(ref path) => {
                eprintln!("[CONFIG] Config file not found: {:?}, using defaults", path);
                AppConfig::default()
            }
            None => {
                eprintln!("[CONFIG] No config file found, using defaults");
                AppConfig::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse a configuration file without applying overrides
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_norway::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Find the configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("config.yaml"),
            PathBuf::from("config/config.yaml"),
            PathBuf::from("/etc/org-portal/config.yaml"),
            dirs::config_dir()
                .map(|p| p.join("org-portal/config.yaml"))
                .unwrap_or_default(),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("ORG_PORTAL_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ORG_PORTAL_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(dir) = std::env::var("ORG_PORTAL_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
        if let Ok(cert) = std::env::var("ORG_PORTAL_TLS_CERT") {
            let key = std::env::var("ORG_PORTAL_TLS_KEY").unwrap_or_default();
            self.server.tls = Some(TlsConfig {
                cert_file: PathBuf::from(cert),
                key_file: PathBuf::from(key),
                min_version: std::env::var("ORG_PORTAL_TLS_MIN_VERSION")
                    .unwrap_or_else(|_| default_min_tls_version()),
            });
        }

        // Backend overrides
        if let Ok(url) = std::env::var("BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var("BACKEND_ANON_KEY") {
            self.backend.anon_key = key;
        }
        if let Ok(key) = std::env::var("BACKEND_SERVICE_ROLE_KEY") {
            self.backend.service_role_key = Some(key);
        }
        if let Ok(timeout) = std::env::var("BACKEND_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.backend.timeout_secs = t;
            }
        }

        if let Ok(rollback) = std::env::var("ORG_PORTAL_SIGNUP_ROLLBACK") {
            self.signup.rollback_on_failure = parse_bool(&rollback);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ORG_PORTAL_LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }
        if let Ok(target) = std::env::var("ORG_PORTAL_LOG_TARGET") {
            self.logging.target = match target.to_lowercase().as_str() {
                "file" => LogTarget::File,
                "both" => LogTarget::Both,
                _ => LogTarget::Console,
            };
        }
        if let Ok(dir) = std::env::var("ORG_PORTAL_LOG_DIR") {
            self.logging.log_dir = PathBuf::from(dir);
        }
    }

    /// Whether sign-up rollback is on but accounts cannot be deleted
    ///
    /// Deleting an account needs the service role key; without it a rolled
    /// back sign-up still leaves the registered account behind.
    pub fn rollback_without_service_key(&self) -> bool {
        self.signup.rollback_on_failure
            && self
                .backend
                .service_role_key
                .as_deref()
                .is_none_or(|key| key.trim().is_empty())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.backend.url.is_empty() {
            anyhow::bail!("Backend URL cannot be empty (set backend.url or BACKEND_URL)");
        }
        let url = reqwest::Url::parse(&self.backend.url)
            .with_context(|| format!("Invalid backend URL: {}", self.backend.url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("Backend URL must use http or https: {}", self.backend.url);
        }

        if self.backend.anon_key.is_empty() {
            anyhow::bail!("Backend anon key cannot be empty (set backend.anon_key or BACKEND_ANON_KEY)");
        }

        if self.backend.organisation_table.is_empty() || self.backend.member_table.is_empty() {
            anyhow::bail!("Backend table names cannot be empty");
        }

        if let Some(ref tls) = self.server.tls {
            if !tls.cert_file.exists() {
                anyhow::bail!("TLS certificate file not found: {:?}", tls.cert_file);
            }
            if !tls.key_file.exists() {
                anyhow::bail!("TLS key file not found: {:?}", tls.key_file);
            }
            if tls.min_version != "1.2" && tls.min_version != "1.3" {
                anyhow::bail!(
                    "Invalid TLS minimum version: {}. Must be '1.2' or '1.3'",
                    tls.min_version
                );
            }
        }

        Ok(())
    }
}
