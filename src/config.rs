use config::{Config as ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding `contacts.json`
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the external API; the list endpoint is proxied to
    /// `{api_url}/contact` when set
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub resend_api_key: Option<String>,
    /// Override of the Resend endpoint, mostly for local testing
    #[serde(default)]
    pub resend_api_url: Option<String>,
    /// Recipient of contact notifications
    #[serde(default)]
    pub contact_address: Option<String>,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            resend_api_url: None,
            contact_address: None,
            from_address: default_from_address(),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
        }
    }
}

fn default_from_address() -> String {
    "Contact Form <onboarding@resend.dev>".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Unprefixed variables kept from the previous deployment, mapped to their key
const LEGACY_ENV: [(&str, &str); 3] = [
    ("NEXT_PUBLIC_API_URL", "upstream.api_url"),
    ("RESEND_API_KEY", "email.resend_api_key"),
    ("CONTACT_FALLBACK_EMAIL", "email.contact_address"),
];

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_owned();
    if value.is_empty() { None } else { Some(value) }
}

/// Override keys from the legacy variables returned by `get`, skipping blank ones
fn apply_legacy_env(
    mut builder: config::ConfigBuilder<DefaultState>,
    get: impl Fn(&str) -> Option<String>,
) -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in LEGACY_ENV {
        if let Some(value) = get(var).and_then(non_empty) {
            builder = builder.set_override(key, value)?;
        }
    }

    Ok(builder)
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (NEXT_PUBLIC_API_URL, RESEND_API_KEY, CONTACT_FALLBACK_EMAIL)
    /// 2. Prefixed environment variables (CARELEAD__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("storage.data_dir", ".data")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("CARELEAD")
                .separator("__")
                .try_parsing(true),
        );

        builder = apply_legacy_env(builder, |var| env::var(var).ok())?;

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err("Storage data_dir must not be empty".to_string());
        }
        if self.upstream.timeout_secs == 0 {
            return Err("Upstream timeout_secs must be at least 1".to_string());
        }
        if !matches!(self.observability.log_format.as_str(), "pretty" | "json") {
            return Err("Observability log_format must be \"pretty\" or \"json\"".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                data_dir: ".data".to_string(),
            },
            upstream: UpstreamConfig::default(),
            email: EmailConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_data_dir() {
        let mut config = config();
        config.storage.data_dir = "  ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = config();
        config.upstream.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_unknown_log_format() {
        let mut config = config();
        config.observability.log_format = "xml".to_string();

        assert!(config.validate().is_err());
    }

    fn build_with(vars: &[(&str, &str)]) -> Config {
        let builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")
            .unwrap()
            .set_default("server.port", 3000)
            .unwrap()
            .set_default("storage.data_dir", ".data")
            .unwrap()
            .set_default("email.contact_address", "office@example.com")
            .unwrap();

        let lookup = |var: &str| {
            vars.iter()
                .find(|(name, _)| *name == var)
                .map(|(_, value)| value.to_string())
        };

        apply_legacy_env(builder, lookup)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_legacy_env_maps_each_variable() {
        let config = build_with(&[
            ("NEXT_PUBLIC_API_URL", "https://api.example.com"),
            ("RESEND_API_KEY", "re_123"),
            ("CONTACT_FALLBACK_EMAIL", "leads@example.com"),
        ]);

        assert_eq!(
            config.upstream.api_url.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(config.email.resend_api_key.as_deref(), Some("re_123"));
        assert_eq!(
            config.email.contact_address.as_deref(),
            Some("leads@example.com")
        );
    }

    #[test]
    fn test_legacy_env_ignores_blank_values() {
        let config = build_with(&[
            ("NEXT_PUBLIC_API_URL", ""),
            ("RESEND_API_KEY", "   "),
            ("CONTACT_FALLBACK_EMAIL", " "),
        ]);

        assert_eq!(config.upstream.api_url, None);
        assert_eq!(config.email.resend_api_key, None);
        assert_eq!(
            config.email.contact_address.as_deref(),
            Some("office@example.com")
        );
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(
            non_empty(" https://api.example.com ".to_string()),
            Some("https://api.example.com".to_string())
        );
    }
}
